//! Logging out clears the session cookie. The API has no log-out endpoint, the
//! token simply stops being sent.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    AppState,
    auth::{get_current_user, invalidate_session_cookie},
    endpoints,
};

/// Invalidate the session cookie and redirect the client to the log-in page.
pub async fn get_log_out(State(state): State<AppState>, jar: PrivateCookieJar) -> Response {
    if let Some(session) = get_current_user(&jar) {
        tracing::info!("{} logged out", session.email);
    }

    let jar = invalidate_session_cookie(jar, state.secure_cookies);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
