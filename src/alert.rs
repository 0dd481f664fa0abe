//! Alerts for displaying success and error messages to users.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element that
//! [base](crate::html::base) places on every page, so any htmx response can
//! carry one regardless of its target.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// A transient message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    fn is_error(&self) -> bool {
        matches!(self, Alert::Error { .. } | Alert::ErrorSimple { .. })
    }

    fn message(&self) -> &str {
        match self {
            Alert::Success { message, .. }
            | Alert::SuccessSimple { message }
            | Alert::Error { message, .. }
            | Alert::ErrorSimple { message } => message,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Alert::Success { details, .. } | Alert::Error { details, .. } => Some(details),
            Alert::SuccessSimple { .. } | Alert::ErrorSimple { .. } => None,
        }
    }

    pub fn into_markup(self) -> Markup {
        let container_style = if self.is_error() {
            "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };
        let role = if self.is_error() { "alert" } else { "status" };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role=(role)
                {
                    div class="flex-1"
                    {
                        p class="font-medium" { (self.message()) }

                        @if let Some(details) = self.details()
                        {
                            @if !details.is_empty()
                            {
                                p class="mt-1 text-sm" { (details) }
                            }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="text-sm font-semibold opacity-70 hover:opacity-100"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        let status_code = if self.is_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::OK
        };

        (status_code, self.into_html()).into_response()
    }
}
