use crate::{
    account::{Account, AccountId, AccountRequest, TotalBalance},
    api::{ApiClient, ApiError},
    auth::Session,
};

const API_URL: &str = "/api/accounts";

impl ApiClient {
    pub async fn get_all_accounts(&self, session: &Session) -> Result<Vec<Account>, ApiError> {
        self.get(API_URL, session).await
    }

    pub async fn get_account_by_id(
        &self,
        id: AccountId,
        session: &Session,
    ) -> Result<Account, ApiError> {
        self.get(&format!("{API_URL}/{id}"), session).await
    }

    pub async fn create_account(
        &self,
        account: &AccountRequest,
        session: &Session,
    ) -> Result<Account, ApiError> {
        self.post(API_URL, account, Some(session)).await
    }

    pub async fn update_account(
        &self,
        id: AccountId,
        account: &AccountRequest,
        session: &Session,
    ) -> Result<Account, ApiError> {
        self.put(&format!("{API_URL}/{id}"), account, session).await
    }

    pub async fn delete_account(&self, id: AccountId, session: &Session) -> Result<(), ApiError> {
        self.delete(&format!("{API_URL}/{id}"), session).await
    }

    /// The sum of the balances of all of the user's accounts.
    pub async fn get_total_balance(&self, session: &Session) -> Result<f64, ApiError> {
        self.get::<TotalBalance>(&format!("{API_URL}/total-balance"), session)
            .await
            .map(|total| total.total_balance)
    }
}
