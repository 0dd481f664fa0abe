//! Defines the endpoint for deleting a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    auth::Session,
    endpoints,
    transaction::{TransactionId, transactions_page::TransactionState},
};

/// A route handler for deleting a transaction.
///
/// On success the client reloads the transactions page, otherwise an error
/// alert is shown.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(session): Extension<Session>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state
        .api_client
        .delete_transaction(transaction_id, &session)
        .await
    {
        Ok(()) => {
            tracing::info!("Deleted transaction {transaction_id}");
            (HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()), StatusCode::OK).into_response()
        }
        Err(error) => Error::action("Failed to delete transaction", error).into_alert_response(),
    }
}
