//! A web client for a personal finance tracker.
//!
//! The server renders HTML pages for accounts, transactions, budgets and
//! reports, and forwards every read and write to the finance tracker's REST
//! API. It keeps no data of its own beyond the encrypted session cookie.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod api;
mod app_state;
mod auth;
mod budget;
mod dashboard;
mod endpoints;
mod form_mode;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod report;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiError};
pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A call to the REST API failed and there is nothing more specific to
    /// say about it.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A call to the REST API made on behalf of a user action failed.
    ///
    /// `message` is shown to the user as is, e.g. "Failed to save account".
    #[error("{message}: {source}")]
    Action {
        /// The message shown to the user.
        message: &'static str,
        /// The error returned by the API client.
        source: ApiError,
    },

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl Error {
    /// Attach the user facing `message` to an API error from a user action.
    pub(crate) fn action(message: &'static str, source: ApiError) -> Self {
        Error::Action { message, source }
    }

    /// Render the error as an alert for htmx requests.
    ///
    /// The error is logged here, so callers do not need to log it again.
    pub(crate) fn into_alert_response(self) -> Response {
        tracing::error!("{self}");

        match self {
            Error::Action { message, .. } => Alert::ErrorSimple {
                message: message.to_owned(),
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => Alert::Error {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            _ => Alert::Error {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            }
            .into_response(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::Api(ApiError::Request(error)) => {
                tracing::error!("Could not reach the finance API: {error}");
                InternalServerError {
                    description: "Could not reach the finance API",
                    fix: "Check that the API server is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}
