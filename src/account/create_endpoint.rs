//! Defines the endpoint for creating a new account.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    account::{AccountRequest, accounts_page::AccountState},
    auth::Session,
    endpoints,
};

/// A route handler for creating a new account.
///
/// Redirects to the accounts page on success, otherwise responds with an
/// error alert.
pub async fn create_account_endpoint(
    State(state): State<AccountState>,
    Extension(session): Extension<Session>,
    Form(form): Form<AccountRequest>,
) -> Response {
    let request = AccountRequest {
        name: form.name.trim().to_owned(),
        ..form
    };

    match state.api_client.create_account(&request, &session).await {
        Ok(account) => {
            tracing::info!("Created account {} \"{}\"", account.id, account.name);
            (
                HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => Error::action("Failed to save account", error).into_alert_response(),
    }
}
