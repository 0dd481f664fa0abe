use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
};

const LOG_IN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";

/// The credentials sent to the API to log in.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInRequest {
    pub email: String,
    pub password: String,
}

/// The details sent to the API to create a new user.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ApiClient {
    /// Exchange an email and password for a session.
    ///
    /// The returned session may lack a token, callers should check
    /// [Session::is_authenticated] before persisting it.
    pub async fn login(&self, request: &LogInRequest) -> Result<Session, ApiError> {
        self.post(LOG_IN_PATH, request, None).await
    }

    /// Create a new user and get a session for them.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Session, ApiError> {
        self.post(REGISTER_PATH, request, None).await
    }
}
