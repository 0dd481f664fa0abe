//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! Credentials are checked by the REST API, this module only stores the session it returns.

use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    api::{ApiError, LogInRequest},
    auth::{Session, invalidate_session_cookie, normalize_redirect_url, set_session_cookie},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, form_error_message,
        log_in_register, password_input, submit_button,
    },
};

pub const LOG_IN_FAILED_ERROR_MSG: &str = "Login failed. Please check your email and password.";

fn log_in_form(email: &str, error_message: Option<&str>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            hx-target="this"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                input
                    type="email"
                    name="email"
                    id="email"
                    placeholder="you@example.com"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(email);
            }

            (password_input("", 0))

            (form_error_message(error_message))

            (submit_button("Log in"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                a href=(endpoints::REGISTER_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Register here"
                }
            }
        }
    }
}

/// Keep `raw_url` only if it is a safe local redirect target.
pub(super) fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let log_in_form = log_in_form("", None, redirect_url.as_deref());
    let content = log_in_register("Log in to your account", &log_in_form);
    base("Log In", &[], &content).into_response()
}

/// Store `session` in the session cookie and send the client to `redirect_url`.
///
/// Shared by log-in and registration, which both receive a session from the API.
pub(super) fn start_session(
    state: &AppState,
    jar: PrivateCookieJar,
    session: &Session,
    redirect_url: &str,
) -> Response {
    match set_session_cookie(
        jar.clone(),
        session,
        state.cookie_duration,
        state.secure_cookies,
    ) {
        Ok(updated_jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(redirect_url.to_owned()),
            updated_jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                invalidate_session_cookie(jar, state.secure_cookies),
            )
                .into_response()
        }
    }
}

/// The message shown on the log-in or registration form when the API call fails.
pub(super) fn failure_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Status { .. } => error.server_message().unwrap_or(fallback).to_owned(),
        ApiError::Request(_) => {
            "Could not reach the server. Please try again later.".to_owned()
        }
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client is redirected to the
/// dashboard page, or the page they were on before being asked to log in. Otherwise, the form is
/// returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<LogInForm>,
) -> Response {
    let redirect_url = parse_redirect_url(form.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();
    let request = LogInRequest {
        email: form.email.trim().to_owned(),
        password: form.password,
    };

    let session = match state.api_client.login(&request).await {
        Ok(session) => session,
        Err(error) => {
            tracing::warn!("Log-in for {} failed: {error}", request.email);
            let message = failure_message(&error, LOG_IN_FAILED_ERROR_MSG);
            return log_in_form(&request.email, Some(&message), redirect_url).into_response();
        }
    };

    if !session.is_authenticated() {
        tracing::error!("The API accepted the log-in for {} but sent no token", request.email);
        return log_in_form(&request.email, Some(LOG_IN_FAILED_ERROR_MSG), redirect_url)
            .into_response();
    }

    tracing::info!("{} logged in", session.email);
    start_session(
        &state,
        jar,
        &session,
        redirect_url.unwrap_or(endpoints::DASHBOARD_VIEW),
    )
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// The data entered by the user in the log-in form.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInForm {
    pub email: String,
    pub password: String,

    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}
