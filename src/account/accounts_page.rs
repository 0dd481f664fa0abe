//! Displays accounts and their balances, with the form for adding and editing them.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    account::{Account, AccountRequest, AccountType},
    api::ApiClient,
    auth::Session,
    endpoints::{self, format_endpoint},
    form_mode::{FormMode, FormQuery, edit_form_url, new_form_url},
    html::{
        CARD_STYLE, FORM_TEXT_INPUT_STYLE, NEUTRAL_BADGE_STYLE, PAGE_CONTAINER_STYLE,
        amount_style, base, currency_input_styles, edit_delete_action_links, form_card,
        form_field, format_currency, list_page_header, submit_button,
    },
    navigation::NavBar,
};

/// The state needed for the accounts page and its endpoints.
#[derive(Debug, Clone)]
pub struct AccountState {
    pub api_client: ApiClient,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
        }
    }
}

pub(super) const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this account?";

fn account_form(mode: &FormMode<Account>) -> Markup {
    let (title, hx_post, hx_put, request, button_label) = match mode {
        FormMode::Hidden => return html!(),
        FormMode::Creating => (
            "Add New Account",
            Some(endpoints::ACCOUNTS_API.to_owned()),
            None,
            None,
            "Create Account",
        ),
        FormMode::Editing(account) => (
            "Edit Account",
            None,
            Some(format_endpoint(endpoints::ACCOUNT, account.id)),
            Some(AccountRequest::from(account)),
            "Update Account",
        ),
    };
    let selected_type = request
        .as_ref()
        .map_or(AccountType::Savings, |request| request.account_type);

    let form = html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4"
        {
            (form_field("Account Name", "name", html! {
                input
                    type="text"
                    name="name"
                    id="name"
                    placeholder="e.g. HDFC Savings"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=[request.as_ref().map(|request| &request.name)];
            }))

            (form_field("Account Type", "type", html! {
                select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE) required
                {
                    @for account_type in AccountType::ALL {
                        option
                            value=(account_type.as_str())
                            selected[account_type == selected_type]
                        {
                            (account_type.label())
                        }
                    }
                }
            }))

            (form_field("Balance", "balance", html! {
                div class="input-wrapper"
                {
                    input
                        type="number"
                        name="balance"
                        id="balance"
                        step="0.01"
                        placeholder="0.00"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required
                        value=[request.as_ref().map(|request| request.balance)];
                }
            }))

            (submit_button(button_label))
        }
    };

    form_card(title, endpoints::ACCOUNTS_VIEW, form)
}

fn account_card(account: &Account) -> Markup {
    html! {
        li class=(CARD_STYLE) data-account-card="true"
        {
            h3 class="text-lg font-semibold" { (account.name) }
            span class=(NEUTRAL_BADGE_STYLE) { (account.account_type.label()) }

            p class="mt-4 text-sm text-gray-500 dark:text-gray-400" { "Current Balance" }
            p class={ "text-2xl font-bold tabular-nums " (amount_style(account.balance)) }
            {
                (format_currency(account.balance))
            }

            div class="mt-4 flex items-center gap-4 text-sm"
            {
                (edit_delete_action_links(
                    &edit_form_url(endpoints::ACCOUNTS_VIEW, account.id),
                    &format_endpoint(endpoints::ACCOUNT, account.id),
                    DELETE_CONFIRM_MESSAGE,
                ))
            }
        }
    }
}

fn accounts_view(session: &Session, accounts: &[Account], mode: &FormMode<Account>) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW, &session.name).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl"
            {
                (list_page_header("Accounts", "Add Account", &new_form_url(endpoints::ACCOUNTS_VIEW)))

                (account_form(mode))

                ul id="accounts" class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4"
                {
                    @for account in accounts {
                        (account_card(account))
                    }
                }

                @if accounts.is_empty() {
                    p class="py-10 text-center text-gray-500 dark:text-gray-400"
                    {
                        "No accounts yet. Click \"Add Account\" to get started!"
                    }
                }
            }
        }
    );

    base("Accounts", &[currency_input_styles()], &content)
}

/// Renders the accounts page showing all accounts.
///
/// If the accounts cannot be loaded the page is shown without any.
pub async fn get_accounts_page(
    State(state): State<AccountState>,
    Extension(session): Extension<Session>,
    Query(query): Query<FormQuery>,
) -> Response {
    let accounts = state
        .api_client
        .get_all_accounts(&session)
        .await
        .inspect_err(|error| tracing::error!("Could not load accounts: {error}"))
        .unwrap_or_default();

    let mode = query.resolve(&accounts, |account| account.id);

    accounts_view(&session, &accounts, &mode).into_response()
}
