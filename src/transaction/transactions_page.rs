//! Displays the transaction list with its type and search filters, and the
//! form for adding and editing transactions.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    account::{Account, AccountId},
    api::ApiClient,
    auth::Session,
    endpoints::{self, format_endpoint},
    form_mode::{FormMode, FormQuery, edit_form_url, new_form_url},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, EXPENSE_BADGE_STYLE, FORM_TEXT_INPUT_STYLE,
        INCOME_BADGE_STYLE, PAGE_CONTAINER_STYLE, amount_style, base, currency_input_styles,
        edit_delete_action_links, form_card, form_field, format_currency, format_date,
        list_page_header, submit_button,
    },
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        Transaction, TransactionType,
        category_options::category_options,
        filter::{TransactionFilter, TypeFilter},
    },
};

/// The state needed for the transactions page and its endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub api_client: ApiClient,
    /// The canonical timezone name used to pick the default transaction date.
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl TransactionState {
    fn today(&self) -> Result<Date, Error> {
        local_today(&self.local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))
    }
}

pub(super) const DELETE_CONFIRM_MESSAGE: &str =
    "Are you sure you want to delete this transaction?";

/// The transactions page URL with `filter` applied.
fn filter_url(filter: &TransactionFilter) -> String {
    match serde_urlencoded::to_string(filter) {
        Ok(query) => format!("{}?{query}", endpoints::TRANSACTIONS_VIEW),
        Err(error) => {
            tracing::warn!("Could not encode transaction filter {filter:?}: {error}");
            endpoints::TRANSACTIONS_VIEW.to_owned()
        }
    }
}

/// The values the transaction form starts with.
struct FormValues {
    account_id: Option<AccountId>,
    transaction_type: TransactionType,
    category: String,
    amount: Option<f64>,
    transaction_date: Date,
    description: String,
}

impl FormValues {
    fn new(today: Date) -> Self {
        Self {
            account_id: None,
            transaction_type: TransactionType::Expense,
            category: String::new(),
            amount: None,
            transaction_date: today,
            description: String::new(),
        }
    }

    fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            account_id: transaction.account.as_ref().map(|account| account.id),
            transaction_type: transaction.transaction_type,
            category: transaction.category.clone(),
            amount: Some(transaction.amount),
            transaction_date: transaction.transaction_date,
            description: transaction.description.clone().unwrap_or_default(),
        }
    }
}

fn transaction_form(mode: &FormMode<Transaction>, accounts: &[Account], today: Date) -> Markup {
    let (title, hx_post, hx_put, values, button_label) = match mode {
        FormMode::Hidden => return html!(),
        FormMode::Creating => (
            "Add New Transaction",
            Some(endpoints::TRANSACTIONS_API.to_owned()),
            None,
            FormValues::new(today),
            "Create Transaction",
        ),
        FormMode::Editing(transaction) => (
            "Edit Transaction",
            None,
            Some(format_endpoint(endpoints::TRANSACTION, transaction.id)),
            FormValues::from_transaction(transaction),
            "Update Transaction",
        ),
    };

    let form = html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="grid grid-cols-1 md:grid-cols-2 gap-4"
        {
            (form_field("Account", "accountId", html! {
                select name="accountId" id="accountId" class=(FORM_TEXT_INPUT_STYLE) required
                {
                    option value="" disabled selected[values.account_id.is_none()]
                    {
                        "Select Account"
                    }

                    @for account in accounts {
                        option
                            value=(account.id)
                            selected[values.account_id == Some(account.id)]
                        {
                            (account.name) " (" (format_currency(account.balance)) ")"
                        }
                    }
                }
            }))

            (form_field("Type", "type", html! {
                select
                    name="type"
                    id="type"
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-get=(endpoints::TRANSACTION_CATEGORIES)
                    hx-target="#category"
                    hx-trigger="change"
                    required
                {
                    @for transaction_type in TransactionType::ALL {
                        option
                            value=(transaction_type.as_str())
                            selected[transaction_type == values.transaction_type]
                        {
                            (transaction_type.label())
                        }
                    }
                }
            }))

            (form_field("Category", "category", html! {
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE) required
                {
                    (category_options(values.transaction_type, &values.category))
                }
            }))

            (form_field("Amount", "amount", html! {
                div class="input-wrapper"
                {
                    input
                        type="number"
                        name="amount"
                        id="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required
                        value=[values.amount];
                }
            }))

            (form_field("Date", "transactionDate", html! {
                input
                    type="date"
                    name="transactionDate"
                    id="transactionDate"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(values.transaction_date);
            }))

            (form_field("Description", "description", html! {
                input
                    type="text"
                    name="description"
                    id="description"
                    placeholder="Optional"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(values.description);
            }))

            div class="md:col-span-2" { (submit_button(button_label)) }
        }
    };

    form_card(title, endpoints::TRANSACTIONS_VIEW, form)
}

fn filter_bar(filter: &TransactionFilter) -> Markup {
    let type_links: Vec<(TypeFilter, String)> = TypeFilter::ALL
        .into_iter()
        .map(|type_filter| {
            let url = filter_url(&TransactionFilter {
                type_filter,
                search: filter.search.clone(),
            });
            (type_filter, url)
        })
        .collect();

    html! {
        div class={ "mb-6 flex flex-wrap items-center gap-4 " (CARD_STYLE) }
        {
            form
                method="get"
                action=(endpoints::TRANSACTIONS_VIEW)
                role="search"
                class="flex flex-1 min-w-64 gap-2"
            {
                input type="hidden" name="type" value=(filter.type_filter.as_str());
                input
                    type="search"
                    name="search"
                    placeholder="Search by category or description"
                    aria-label="Search transactions"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(filter.search);
                button type="submit" class="px-4 py-2 rounded text-white bg-blue-500 hover:bg-blue-600"
                {
                    "Search"
                }
            }

            nav id="type-filter" class="flex gap-2"
            {
                @for (type_filter, url) in &type_links {
                    @let is_active = *type_filter == filter.type_filter;

                    a
                        href=(url)
                        aria-current=[is_active.then_some("page")]
                        class=(if is_active {
                            "px-3 py-2 rounded text-white bg-blue-600"
                        } else {
                            "px-3 py-2 rounded bg-gray-100 dark:bg-gray-700 hover:bg-gray-200"
                        })
                    {
                        (type_filter.label())
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (badge_style, sign) = match transaction.transaction_type {
        TransactionType::Income => (INCOME_BADGE_STYLE, "+"),
        TransactionType::Expense => (EXPENSE_BADGE_STYLE, ""),
    };
    let signed_amount = transaction.signed_amount();
    let description = transaction
        .description
        .as_deref()
        .filter(|description| !description.is_empty());

    html! {
        tr class="border-b border-gray-200 dark:border-gray-700"
        {
            td class="px-4 py-3" { span class=(badge_style) { (transaction.transaction_type.label()) } }
            td class="px-4 py-3 font-medium" { (transaction.category) }
            td class="px-4 py-3"
            {
                @if let Some(description) = description {
                    (description)
                } @else {
                    span class="italic text-gray-400" { "No description" }
                }
            }
            td class="px-4 py-3"
            {
                @if let Some(account) = &transaction.account {
                    (account.name)
                } @else {
                    "Unknown Account"
                }
            }
            td class="px-4 py-3 whitespace-nowrap"
            {
                time datetime=(transaction.transaction_date) { (format_date(transaction.transaction_date)) }
            }
            td class={ "px-4 py-3 text-right font-semibold tabular-nums " (amount_style(signed_amount)) }
            {
                (sign) (format_currency(signed_amount))
            }
            td class="px-4 py-3 flex gap-4 justify-end"
            {
                (edit_delete_action_links(
                    &edit_form_url(endpoints::TRANSACTIONS_VIEW, transaction.id),
                    &format_endpoint(endpoints::TRANSACTION, transaction.id),
                    DELETE_CONFIRM_MESSAGE,
                ))
            }
        }
    }
}

fn transactions_table(transactions: &[&Transaction], filter: &TransactionFilter) -> Markup {
    if transactions.is_empty() {
        let message = if filter.is_active() {
            "No transactions found matching your filters."
        } else {
            "No transactions yet. Add your first transaction to get started!"
        };

        return html! {
            p id="transactions-empty" class="py-10 text-center text-gray-500 dark:text-gray-400"
            {
                (message)
            }
        };
    }

    html! {
        div class="overflow-x-auto rounded-lg border border-gray-200 dark:border-gray-700"
        {
            table id="transactions" class="w-full text-sm text-left"
            {
                thead class="text-xs uppercase bg-gray-50 dark:bg-gray-700 text-gray-700 dark:text-gray-400"
                {
                    tr
                    {
                        th scope="col" class="px-4 py-3" { "Type" }
                        th scope="col" class="px-4 py-3" { "Category" }
                        th scope="col" class="px-4 py-3" { "Description" }
                        th scope="col" class="px-4 py-3" { "Account" }
                        th scope="col" class="px-4 py-3" { "Date" }
                        th scope="col" class="px-4 py-3 text-right" { "Amount" }
                        th scope="col" class="px-4 py-3" { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transactions_view(
    session: &Session,
    transactions: &[Transaction],
    accounts: &[Account],
    filter: &TransactionFilter,
    mode: &FormMode<Transaction>,
    today: Date,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW, &session.name).into_html();
    let shown = filter.apply(transactions);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-6xl"
            {
                (list_page_header(
                    "Transactions",
                    "Add Transaction",
                    &new_form_url(endpoints::TRANSACTIONS_VIEW),
                ))

                (transaction_form(mode, accounts, today))

                (filter_bar(filter))

                (transactions_table(&shown, filter))
            }
        }
    );

    base("Transactions", &[currency_input_styles()], &content)
}

fn load_error_view(session: &Session, filter: &TransactionFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW, &session.name).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section
                id="load-error"
                role="alert"
                class="w-full max-w-md mt-10 p-6 text-center rounded-lg border \
                    border-red-300 bg-red-50 text-red-800 \
                    dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            {
                h1 class="text-xl font-semibold" { "Error Loading Transactions" }
                p class="mt-2" { "Failed to load transactions. Please try again." }
                a href=(filter_url(filter)) class={ "inline-block mt-4 " (BUTTON_PRIMARY_STYLE) }
                {
                    "Try Again"
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

/// Renders the transactions page, filtered by the `type` and `search` query
/// parameters.
///
/// Unlike the other pages, a failure to load the transactions or accounts is
/// shown as an error panel with a retry link instead of an empty list.
pub async fn get_transactions_page(
    State(state): State<TransactionState>,
    Extension(session): Extension<Session>,
    Query(filter): Query<TransactionFilter>,
    Query(form_query): Query<FormQuery>,
) -> Response {
    let today = match state.today() {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let loaded = tokio::try_join!(
        state.api_client.get_all_transactions(&session),
        state.api_client.get_all_accounts(&session),
    );
    let (mut transactions, accounts) = match loaded {
        Ok(loaded) => loaded,
        Err(error) => {
            tracing::error!("Could not load transactions: {error}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                load_error_view(&session, &filter),
            )
                .into_response();
        }
    };

    transactions.sort_by(|a, b| {
        b.transaction_date
            .cmp(&a.transaction_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    let mode = form_query.resolve(&transactions, |transaction| transaction.id);

    transactions_view(&session, &transactions, &accounts, &filter, &mode, today).into_response()
}
