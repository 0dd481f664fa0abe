use time::Month;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    budget::{Budget, BudgetId, BudgetRequest},
};

const API_URL: &str = "/api/budgets";

impl ApiClient {
    pub async fn get_all_budgets(&self, session: &Session) -> Result<Vec<Budget>, ApiError> {
        self.get(API_URL, session).await
    }

    /// The budgets for the current month, as decided by the API.
    pub async fn get_current_month_budgets(
        &self,
        session: &Session,
    ) -> Result<Vec<Budget>, ApiError> {
        self.get(&format!("{API_URL}/current"), session).await
    }

    pub async fn get_budget_by_id(
        &self,
        id: BudgetId,
        session: &Session,
    ) -> Result<Budget, ApiError> {
        self.get(&format!("{API_URL}/{id}"), session).await
    }

    pub async fn get_budgets_by_month_year(
        &self,
        month: Month,
        year: i32,
        session: &Session,
    ) -> Result<Vec<Budget>, ApiError> {
        let month = month as u8;

        self.get(&format!("{API_URL}/month/{month}/year/{year}"), session)
            .await
    }

    pub async fn create_budget(
        &self,
        budget: &BudgetRequest,
        session: &Session,
    ) -> Result<Budget, ApiError> {
        self.post(API_URL, budget, Some(session)).await
    }

    pub async fn update_budget(
        &self,
        id: BudgetId,
        budget: &BudgetRequest,
        session: &Session,
    ) -> Result<Budget, ApiError> {
        self.put(&format!("{API_URL}/{id}"), budget, session).await
    }

    pub async fn delete_budget(&self, id: BudgetId, session: &Session) -> Result<(), ApiError> {
        self.delete(&format!("{API_URL}/{id}"), session).await
    }
}
