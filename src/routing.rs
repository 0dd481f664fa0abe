//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{
        create_account_endpoint, delete_account_endpoint, edit_account_endpoint,
        get_accounts_page,
    },
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_register_page, post_log_in,
        post_register,
    },
    budget::{
        create_budget_endpoint, delete_budget_endpoint, edit_budget_endpoint, get_budgets_page,
    },
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::get_reports_page,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_category_options, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::REGISTER_API, post(post_register))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::ACCOUNTS_VIEW, get(get_accounts_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::BUDGETS_VIEW, get(get_budgets_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These routes are called by htmx, so auth redirects must use the HX-Redirect header.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
            .route(
                endpoints::ACCOUNT,
                put(edit_account_endpoint).delete(delete_account_endpoint),
            )
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(
                endpoints::TRANSACTION,
                put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
            )
            .route(
                endpoints::TRANSACTION_CATEGORIES,
                get(get_category_options),
            )
            .route(endpoints::BUDGETS_API, post(create_budget_endpoint))
            .route(
                endpoints::BUDGET,
                put(edit_budget_endpoint).delete(delete_budget_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;
    use scraper::Html;
    use serde::Serialize;

    use crate::{
        auth::{COOKIE_USER, log_in_url_with_redirect},
        endpoints,
        test_utils::{MockApi, TEST_EMAIL, TEST_PASSWORD, select_texts},
    };

    use super::build_router;

    #[derive(Serialize)]
    struct LogInForm<'a> {
        email: &'a str,
        password: &'a str,
    }

    fn get_test_server(api: &MockApi) -> TestServer {
        TestServer::try_new(build_router(api.app_state())).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn protected_pages_redirect_to_log_in() {
        let api = MockApi::spawn().await;
        let server = get_test_server(&api);

        for page in [
            endpoints::DASHBOARD_VIEW,
            endpoints::ACCOUNTS_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::BUDGETS_VIEW,
            endpoints::REPORTS_VIEW,
        ] {
            let response = server.get(page).await;

            response.assert_status_see_other();
            assert_eq!(response.header("location"), log_in_url_with_redirect(page));
        }
    }

    #[tokio::test]
    async fn htmx_mutation_without_session_gets_hx_redirect() {
        let api = MockApi::spawn().await;
        let server = get_test_server(&api);

        let response = server
            .delete("/api/accounts/1")
            .add_header("HX-Request", "true")
            .add_header("HX-Current-URL", endpoints::ACCOUNTS_VIEW)
            .await;

        assert_eq!(
            response.header("hx-redirect"),
            log_in_url_with_redirect(endpoints::ACCOUNTS_VIEW)
        );
    }

    #[tokio::test]
    async fn logged_in_user_can_see_dashboard() {
        let api = MockApi::spawn().await;
        let server = get_test_server(&api);

        let response = server
            .post(endpoints::LOG_IN_API)
            .form(&LogInForm {
                email: TEST_EMAIL,
                password: TEST_PASSWORD,
            })
            .await;
        response.assert_status_see_other();
        assert_eq!(response.header("hx-redirect"), endpoints::DASHBOARD_VIEW);
        let session_cookie = response.cookie(COOKIE_USER);

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookie(session_cookie)
            .await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_eq!(select_texts(&html, "#welcome"), ["Welcome, Asha"]);
    }

    #[tokio::test]
    async fn malformed_query_parameters_still_render_pages() {
        let api = MockApi::spawn().await;
        let server = get_test_server(&api);
        let session_cookie = server
            .post(endpoints::LOG_IN_API)
            .form(&LogInForm {
                email: TEST_EMAIL,
                password: TEST_PASSWORD,
            })
            .await
            .cookie(COOKIE_USER);

        let response = server
            .get("/reports?range=NEXT_DECADE")
            .add_cookie(session_cookie.clone())
            .await;
        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_eq!(
            select_texts(&html, "#time-range a[aria-current=page]"),
            ["This Month"]
        );

        let response = server
            .get("/accounts?edit=abc")
            .add_cookie(session_cookie)
            .await;
        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert!(select_texts(&html, "form").is_empty());
    }

    #[tokio::test]
    async fn log_in_page_is_public() {
        let api = MockApi::spawn().await;
        let server = get_test_server(&api);

        server.get(endpoints::LOG_IN_VIEW).await.assert_status_ok();
        server.get(endpoints::REGISTER_VIEW).await.assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let api = MockApi::spawn().await;
        let server = get_test_server(&api);

        server.get("/no/such/page").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn root_redirects_logged_out_user_to_log_in() {
        let api = MockApi::spawn().await;
        let server = get_test_server(&api);

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
    }
}
