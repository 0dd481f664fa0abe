//! The registration page and the handler that creates an account with the REST API.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    api::RegisterRequest,
    auth::log_in::{failure_message, start_session},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, form_error_message,
        log_in_register, password_input, submit_button,
    },
};

pub const REGISTER_FAILED_ERROR_MSG: &str = "Registration failed. Please try again.";
const PASSWORD_MIN_LENGTH: u8 = 6;

/// The data entered by the user in the registration form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Empty when the user skipped the field.
    #[serde(default)]
    pub phone: String,
}

impl RegisterForm {
    fn into_request(self) -> RegisterRequest {
        let phone = self.phone.trim();

        RegisterRequest {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password,
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
        }
    }
}

fn text_input(label: &str, name: &str, type_: &str, value: &str, required: bool) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                type=(type_)
                name=(name)
                id=(name)
                class=(FORM_TEXT_INPUT_STYLE)
                required[required]
                value=(value);
        }
    }
}

fn register_form(form: &RegisterForm, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::REGISTER_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            hx-target="this"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            (text_input("Name", "name", "text", &form.name, true))
            (text_input("Email", "email", "email", &form.email, true))
            (password_input("", PASSWORD_MIN_LENGTH))
            (text_input("Phone (optional)", "phone", "tel", &form.phone, false))

            (form_error_message(error_message))

            (submit_button("Create account"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Already have an account? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let form = register_form(&RegisterForm::default(), None);
    let content = log_in_register("Create an account", &form);
    base("Register", &[], &content).into_response()
}

/// Register a new user with the API and log them in.
///
/// On failure the form is returned with the user's input, minus the password,
/// and the API's error message.
pub async fn post_register(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let request = form.clone().into_request();
    let retry_form = RegisterForm {
        password: String::new(),
        ..form
    };

    let session = match state.api_client.register(&request).await {
        Ok(session) => session,
        Err(error) => {
            tracing::warn!("Registration for {} failed: {error}", request.email);
            let message = failure_message(&error, REGISTER_FAILED_ERROR_MSG);
            return register_form(&retry_form, Some(&message)).into_response();
        }
    };

    if !session.is_authenticated() {
        tracing::error!("The API registered {} but sent no token", request.email);
        return register_form(&retry_form, Some(REGISTER_FAILED_ERROR_MSG)).into_response();
    }

    tracing::info!("Registered new user {}", session.email);
    start_session(&state, jar, &session, endpoints::DASHBOARD_VIEW)
}
