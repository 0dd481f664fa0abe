//! Defines the endpoint for recording a new transaction.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    auth::Session,
    endpoints,
    transaction::{TransactionRequest, transactions_page::TransactionState},
};

/// A route handler for creating a new transaction.
///
/// The API adjusts the account balance. On success the client reloads the
/// transactions page, otherwise an error alert is shown.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(session): Extension<Session>,
    Form(form): Form<TransactionRequest>,
) -> Response {
    let request = form.normalise();

    match state.api_client.create_transaction(&request, &session).await {
        Ok(transaction) => {
            tracing::info!(
                "Created {} transaction {} of {}",
                transaction.transaction_type,
                transaction.id,
                transaction.amount
            );
            (
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => Error::action("Failed to save transaction", error).into_alert_response(),
    }
}
