//! Defines the endpoint for deleting an account.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    account::{AccountId, accounts_page::AccountState},
    auth::Session,
    endpoints,
};

/// A route handler for deleting an account.
///
/// The API removes the account's transactions along with it. On success the
/// client reloads the accounts page, otherwise an error alert is shown.
pub async fn delete_account_endpoint(
    State(state): State<AccountState>,
    Extension(session): Extension<Session>,
    Path(account_id): Path<AccountId>,
) -> Response {
    match state.api_client.delete_account(account_id, &session).await {
        Ok(()) => {
            tracing::info!("Deleted account {account_id}");
            (HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()), StatusCode::OK).into_response()
        }
        Err(error) => Error::action("Failed to delete account", error).into_alert_response(),
    }
}
