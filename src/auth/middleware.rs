//! Authentication middleware that reads the session cookie and redirects
//! logged-out users to the log-in page.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    auth::{build_log_in_redirect_url, get_current_user},
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Checks for a valid session cookie. The session is placed into the request
/// extensions and the request executed normally if the cookie is valid,
/// otherwise the response from `get_redirect` is returned.
///
/// The token itself is not checked here. An expired token is only discovered
/// when the API rejects a request made with it.
#[inline]
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let jar = match PrivateCookieJar::<Key>::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(error) => {
            tracing::error!("Error getting cookie jar: {error:?}. Redirecting to log in page.");
            let request = Request::from_parts(parts, body);
            return get_redirect(&build_log_in_redirect_url(&request));
        }
    };

    let Some(session) = get_current_user(&jar) else {
        let request = Request::from_parts(parts, body);
        return get_redirect(&build_log_in_redirect_url(&request));
    };

    parts.extensions.insert(session);
    next.run(Request::from_parts(parts, body)).await
}

/// Middleware function that checks for a valid session cookie.
///
/// Logged-out users are redirected to the log-in page with a `303 See Other`.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session): Extension<Session>` to receive the session.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Middleware function that checks for a valid session cookie.
///
/// Logged-out users are redirected to the log-in page via the `HX-Redirect`
/// header, for endpoints that are called by htmx.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session): Extension<Session>` to receive the session.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
