//! The dashboard: an overview of balances, recent transactions and accounts.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    account::Account,
    api::ApiClient,
    auth::Session,
    budget::Budget,
    endpoints,
    form_mode::new_form_url,
    html::{
        CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, amount_style, base, format_currency,
        format_date, link, stat_card,
    },
    navigation::NavBar,
    transaction::{Transaction, TransactionType},
};

/// How many of the latest transactions the dashboard lists.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub api_client: ApiClient,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
#[derive(Debug, Default)]
struct DashboardData {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    total_balance: f64,
}

/// The latest transactions, newest first.
fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<&Transaction> {
    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| {
        b.transaction_date
            .cmp(&a.transaction_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    recent.truncate(count);
    recent
}

fn recent_transactions_view(transactions: &[&Transaction]) -> Markup {
    html! {
        section id="recent-transactions" class=(CARD_STYLE)
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h2 class="text-lg font-semibold" { "Recent Transactions" }
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
            }

            @if transactions.is_empty() {
                p class="text-gray-500 dark:text-gray-400"
                {
                    "No transactions yet. Create your first account and start tracking!"
                }
            }

            ul class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for transaction in transactions {
                    @let signed_amount = transaction.signed_amount();
                    @let sign = if transaction.transaction_type == TransactionType::Income { "+" } else { "" };

                    li class="flex justify-between items-center py-3"
                    {
                        div
                        {
                            p class="font-medium" { (transaction.category) }
                            p class="text-sm text-gray-500 dark:text-gray-400"
                            {
                                (format_date(transaction.transaction_date))
                                @if let Some(account) = &transaction.account {
                                    " · " (account.name)
                                }
                            }
                        }

                        span class={ "font-semibold tabular-nums " (amount_style(signed_amount)) }
                        {
                            (sign) (format_currency(signed_amount))
                        }
                    }
                }
            }
        }
    }
}

fn accounts_overview(accounts: &[Account]) -> Markup {
    html! {
        section id="accounts-overview" class=(CARD_STYLE)
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h2 class="text-lg font-semibold" { "Accounts" }
                a href=(endpoints::ACCOUNTS_VIEW) class=(LINK_STYLE) { "Manage" }
            }

            @if accounts.is_empty() {
                p class="text-gray-500 dark:text-gray-400"
                {
                    "No accounts yet. "
                    (link(&new_form_url(endpoints::ACCOUNTS_VIEW), "Create your first account"))
                }
            }

            ul class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for account in accounts {
                    li class="flex justify-between items-center py-3"
                    {
                        div
                        {
                            p class="font-medium" { (account.name) }
                            p class="text-sm text-gray-500 dark:text-gray-400" { (account.account_type.label()) }
                        }

                        span class={ "font-semibold tabular-nums " (amount_style(account.balance)) }
                        {
                            (format_currency(account.balance))
                        }
                    }
                }
            }
        }
    }
}

fn dashboard_view(session: &Session, data: &DashboardData) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW, &session.name).into_html();
    let recent = recent_transactions(&data.transactions, RECENT_TRANSACTION_COUNT);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-6xl"
            {
                h1 class="mb-6 text-2xl font-bold" { "Dashboard" }

                section id="stats" class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-6"
                {
                    (stat_card(
                        "Total Balance",
                        &format_currency(data.total_balance),
                        amount_style(data.total_balance),
                    ))
                    (stat_card("Accounts", &data.accounts.len().to_string(), ""))
                    (stat_card("Transactions", &recent.len().to_string(), ""))
                    (stat_card("Active Budgets", &data.budgets.len().to_string(), ""))
                }

                div class="grid grid-cols-1 lg:grid-cols-2 gap-4"
                {
                    (recent_transactions_view(&recent))
                    (accounts_overview(&data.accounts))
                }
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Display a page with an overview of the user's data.
///
/// The accounts, transactions, current budgets and total balance are fetched
/// concurrently. If any of them fails the page is shown without data.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(session): Extension<Session>,
) -> Response {
    let api_client = &state.api_client;
    let loaded = tokio::try_join!(
        api_client.get_all_accounts(&session),
        api_client.get_all_transactions(&session),
        api_client.get_current_month_budgets(&session),
        api_client.get_total_balance(&session),
    );

    let data = match loaded {
        Ok((accounts, transactions, budgets, total_balance)) => DashboardData {
            accounts,
            transactions,
            budgets,
            total_balance,
        },
        Err(error) => {
            tracing::error!("Could not load dashboard data: {error}");
            DashboardData::default()
        }
    };

    dashboard_view(&session, &data).into_response()
}

#[cfg(test)]
mod dashboard_tests {
    use axum::{
        Extension,
        extract::{FromRef, State},
    };
    use scraper::Html;
    use time::{Duration, macros::date};

    use crate::{
        account::{AccountRequest, AccountType},
        test_utils::{
            MockApi, assert_status_ok, assert_valid_html, parse_html_document, select_texts,
            test_session,
        },
        transaction::{Transaction, TransactionRequest, TransactionType},
    };

    use super::{DashboardState, get_dashboard_page, recent_transactions};

    async fn render(api: &MockApi, session: crate::auth::Session) -> Html {
        let state = DashboardState::from_ref(&api.app_state());
        let response = get_dashboard_page(State(state), Extension(session)).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    #[tokio::test]
    async fn shows_stats_recent_transactions_and_accounts() {
        let api = MockApi::spawn().await;
        let client = api.client();
        let session = test_session();
        let mut account_ids = Vec::new();
        for (name, balance) in [("Main", 3000.0), ("Visa", -500.0)] {
            let account = client
                .create_account(
                    &AccountRequest {
                        name: name.to_owned(),
                        account_type: AccountType::Checking,
                        balance,
                    },
                    &session,
                )
                .await
                .unwrap();
            account_ids.push(account.id);
        }
        let start = date!(2025 - 10 - 01);
        for day in 0..7 {
            client
                .create_transaction(
                    &TransactionRequest {
                        account_id: account_ids[0],
                        transaction_type: TransactionType::Expense,
                        category: format!("Day {day}"),
                        amount: 10.0,
                        description: None,
                        transaction_date: start + Duration::days(day),
                    },
                    &session,
                )
                .await
                .unwrap();
        }

        let html = render(&api, session).await;

        assert_eq!(
            select_texts(&html, "#stats p.text-2xl"),
            ["₹2,500.00", "2", "5", "0"]
        );
        assert_eq!(
            select_texts(&html, "#recent-transactions li p.font-medium"),
            ["Day 6", "Day 5", "Day 4", "Day 3", "Day 2"]
        );
        assert_eq!(
            select_texts(&html, "#accounts-overview li p.font-medium"),
            ["Main", "Visa"]
        );
    }

    #[tokio::test]
    async fn shows_empty_states() {
        let api = MockApi::spawn().await;

        let html = render(&api, test_session()).await;

        assert_eq!(
            select_texts(&html, "#recent-transactions > p"),
            ["No transactions yet. Create your first account and start tracking!"]
        );
        assert_eq!(
            select_texts(&html, "#stats p.text-2xl"),
            ["₹0.00", "0", "0", "0"]
        );
        assert_eq!(
            select_texts(&html, "#accounts-overview > p"),
            ["No accounts yet. Create your first account"]
        );
    }

    #[tokio::test]
    async fn load_failure_renders_empty_dashboard() {
        let api = MockApi::spawn().await;
        let mut session = test_session();
        session.token = "expired".to_owned();

        let html = render(&api, session).await;

        assert_eq!(
            select_texts(&html, "#stats p.text-2xl"),
            ["₹0.00", "0", "0", "0"]
        );
    }

    #[test]
    fn recent_transactions_breaks_date_ties_by_newest_id() {
        let same_day = date!(2025 - 10 - 05);
        let transactions: Vec<Transaction> = (1..=3)
            .map(|id| {
                Transaction::build(TransactionType::Income, 1.0, "Gift", same_day).finalise(id)
            })
            .collect();

        let got: Vec<_> = recent_transactions(&transactions, 2)
            .iter()
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(got, [3, 2]);
    }
}
