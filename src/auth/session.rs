//! The logged-in user's session and the private cookie it is persisted in.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::Error;

/// The name of the cookie holding the JSON encoded [Session].
pub(crate) const COOKIE_USER: &str = "user";
/// The default duration for which the session cookie is valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::weeks(1);

/// The response the API sends for a successful log-in or registration.
///
/// The whole response is kept so that pages can greet the user by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The bearer token sent with every API request.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    /// The token type, usually "Bearer".
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
}

impl Session {
    /// A session only counts as logged in when it holds a non-empty token.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Add the session cookie to the cookie jar, indicating that a user is logged in.
///
/// The cookie expires `duration` from now. It is only sent over HTTPS when
/// `secure` is set.
///
/// # Errors
///
/// Returns an [Error::JSONSerializationError] if the session cannot be encoded.
pub fn set_session_cookie(
    jar: PrivateCookieJar,
    session: &Session,
    duration: Duration,
    secure: bool,
) -> Result<PrivateCookieJar, Error> {
    let value = serde_json::to_string(session)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
    let expiry = OffsetDateTime::now_utc() + duration;

    Ok(jar.add(
        Cookie::build((COOKIE_USER, value))
            .path("/")
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(secure),
    ))
}

/// Set the session cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub fn invalidate_session_cookie(jar: PrivateCookieJar, secure: bool) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_USER, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(secure),
    )
}

/// Get the session persisted in `jar`.
///
/// A missing cookie, a cookie that cannot be decrypted or decoded, and a
/// session without a token all count as logged out.
pub fn get_current_user(jar: &PrivateCookieJar) -> Option<Session> {
    let cookie = jar.get(COOKIE_USER)?;

    match serde_json::from_str::<Session>(cookie.value_trimmed()) {
        Ok(session) if session.is_authenticated() => Some(session),
        Ok(_) => None,
        Err(error) => {
            tracing::debug!("Could not decode session cookie: {error}");
            None
        }
    }
}

/// The headers that authenticate an API request on behalf of `session`.
///
/// Holds `Authorization: Bearer <token>`, or nothing when there is no
/// session or the token is empty.
pub fn get_auth_header(session: Option<&Session>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let Some(session) = session.filter(|session| session.is_authenticated()) else {
        return headers;
    };

    match HeaderValue::from_str(&format!("Bearer {}", session.token)) {
        Ok(value) => {
            headers.insert(AUTHORIZATION, value);
        }
        Err(error) => tracing::error!("Session token is not a valid header value: {error}"),
    }

    headers
}
