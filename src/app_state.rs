//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::{Date, Duration};

use crate::{
    Error, api::ApiClient, auth::DEFAULT_COOKIE_DURATION, timezone::local_today,
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which the session cookie is valid.
    pub cookie_duration: Duration,

    /// Whether the session cookie is marked `Secure`, i.e. only sent over HTTPS.
    pub secure_cookies: bool,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// The client for the finance tracker REST API.
    pub api_client: ApiClient,
}

impl AppState {
    /// Create a new [AppState] for a client of the API hosted at `api_url`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Kolkata".
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if `local_timezone` is not a
    /// known timezone.
    pub fn new(api_url: &str, cookie_secret: &str, local_timezone: &str) -> Result<Self, Error> {
        if local_today(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            secure_cookies: true,
            local_timezone: local_timezone.to_owned(),
            api_client: ApiClient::new(api_url),
        })
    }

    /// Set whether the session cookie may only be sent over HTTPS.
    ///
    /// Browsers drop `Secure` cookies set over plain HTTP, so this must be
    /// off when the server is not using TLS.
    pub fn with_secure_cookies(mut self, secure_cookies: bool) -> Self {
        self.secure_cookies = secure_cookies;
        self
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> Result<Date, Error> {
        local_today(&self.local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
