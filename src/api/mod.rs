//! Thin HTTP clients for the finance tracker REST API.
//!
//! Every call attaches the bearer token of the current session (see
//! [get_auth_header](crate::auth::get_auth_header)). There is no retry, no
//! timeout override and no validation beyond decoding the JSON shape.

mod accounts;
mod auth;
mod budgets;
mod transactions;

pub use auth::{LogInRequest, RegisterRequest};

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::auth::{Session, get_auth_header};

/// The errors that may occur when calling the REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be decoded.
    #[error("request to the API failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API responded with a non-2xx status code.
    ///
    /// `message` holds the text of the server's message response, if it sent one.
    #[error("the API responded with {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ApiError {
    /// The message the API sent along with an error status, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// The body the API sends for errors and for successful deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A client for the finance tracker REST API.
///
/// Cloning is cheap, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API hosted at `base_url`, e.g. "http://localhost:8080".
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        tracing::debug!("{method} {path}");

        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .headers(get_auth_header(session))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, session: &Session) -> Result<T, ApiError> {
        decode(self.request(Method::GET, path, Some(session))).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        session: &Session,
    ) -> Result<T, ApiError> {
        decode(self.request(Method::GET, path, Some(session)).query(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        session: Option<&Session>,
    ) -> Result<T, ApiError> {
        decode(self.request(Method::POST, path, session).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        session: &Session,
    ) -> Result<T, ApiError> {
        decode(self.request(Method::PUT, path, Some(session)).json(body)).await
    }

    /// Send a DELETE request. The response body, if any, is ignored.
    async fn delete(&self, path: &str, session: &Session) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, path, Some(session))
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<MessageResponse>()
        .await
        .ok()
        .map(|body| body.message);

    Err(ApiError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = check_status(request.send().await?).await?;

    response.json::<T>().await.map_err(ApiError::from)
}
