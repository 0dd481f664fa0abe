//! Defines the endpoint for updating a transaction.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    auth::Session,
    endpoints,
    transaction::{TransactionId, TransactionRequest, transactions_page::TransactionState},
};

pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(session): Extension<Session>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionRequest>,
) -> Response {
    let request = form.normalise();

    match state
        .api_client
        .update_transaction(transaction_id, &request, &session)
        .await
    {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => Error::action("Failed to save transaction", error).into_alert_response(),
    }
}
