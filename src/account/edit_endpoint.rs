//! Defines the endpoint for updating an account.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    account::{AccountId, AccountRequest, accounts_page::AccountState},
    auth::Session,
    endpoints,
};

pub async fn edit_account_endpoint(
    State(state): State<AccountState>,
    Extension(session): Extension<Session>,
    Path(account_id): Path<AccountId>,
    Form(form): Form<AccountRequest>,
) -> Response {
    let request = AccountRequest {
        name: form.name.trim().to_owned(),
        ..form
    };

    match state
        .api_client
        .update_account(account_id, &request, &session)
        .await
    {
        Ok(_) => (
            HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => Error::action("Failed to save account", error).into_alert_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Form,
        extract::{FromRef, Path, State},
        http::StatusCode,
    };

    use crate::{
        account::{AccountRequest, AccountType, accounts_page::AccountState},
        endpoints,
        test_utils::{MockApi, assert_hx_redirect, test_session},
    };

    use super::edit_account_endpoint;

    fn form(name: &str, balance: f64) -> AccountRequest {
        AccountRequest {
            name: name.to_owned(),
            account_type: AccountType::CreditCard,
            balance,
        }
    }

    #[tokio::test]
    async fn updates_account_and_redirects() {
        let api = MockApi::spawn().await;
        let session = test_session();
        let account = api
            .client()
            .create_account(&form("Visa", 0.0), &session)
            .await
            .unwrap();
        let state = AccountState::from_ref(&api.app_state());

        let response = edit_account_endpoint(
            State(state),
            Extension(session.clone()),
            Path(account.id),
            Form(form("Visa Platinum", -320.0)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::ACCOUNTS_VIEW);
        let got = api
            .client()
            .get_account_by_id(account.id, &session)
            .await
            .unwrap();
        assert_eq!(got.name, "Visa Platinum");
        assert_eq!(got.balance, -320.0);
    }

    #[tokio::test]
    async fn missing_account_responds_with_alert() {
        let api = MockApi::spawn().await;
        let state = AccountState::from_ref(&api.app_state());

        let response = edit_account_endpoint(
            State(state),
            Extension(test_session()),
            Path(999),
            Form(form("Ghost", 0.0)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
