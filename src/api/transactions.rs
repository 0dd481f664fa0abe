use time::Date;

use crate::{
    account::AccountId,
    api::{ApiClient, ApiError},
    auth::Session,
    transaction::{DateRangeQuery, Transaction, TransactionId, TransactionRequest},
};

const API_URL: &str = "/api/transactions";

impl ApiClient {
    pub async fn get_all_transactions(
        &self,
        session: &Session,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.get(API_URL, session).await
    }

    pub async fn get_transaction_by_id(
        &self,
        id: TransactionId,
        session: &Session,
    ) -> Result<Transaction, ApiError> {
        self.get(&format!("{API_URL}/{id}"), session).await
    }

    pub async fn get_transactions_by_account(
        &self,
        account_id: AccountId,
        session: &Session,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.get(&format!("{API_URL}/account/{account_id}"), session)
            .await
    }

    /// Transactions dated from `start_date` to `end_date`, inclusive.
    pub async fn get_transactions_by_date_range(
        &self,
        start_date: Date,
        end_date: Date,
        session: &Session,
    ) -> Result<Vec<Transaction>, ApiError> {
        let query = DateRangeQuery {
            start_date,
            end_date,
        };

        self.get_with_query(&format!("{API_URL}/date-range"), &query, session)
            .await
    }

    pub async fn create_transaction(
        &self,
        transaction: &TransactionRequest,
        session: &Session,
    ) -> Result<Transaction, ApiError> {
        self.post(API_URL, transaction, Some(session)).await
    }

    pub async fn update_transaction(
        &self,
        id: TransactionId,
        transaction: &TransactionRequest,
        session: &Session,
    ) -> Result<Transaction, ApiError> {
        self.put(&format!("{API_URL}/{id}"), transaction, session)
            .await
    }

    pub async fn delete_transaction(
        &self,
        id: TransactionId,
        session: &Session,
    ) -> Result<(), ApiError> {
        self.delete(&format!("{API_URL}/{id}"), session).await
    }
}
