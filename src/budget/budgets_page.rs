//! Displays this month's budgets with how much of each has been spent, and
//! the form for adding and editing budgets.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::ApiClient,
    auth::Session,
    budget::{Budget, BudgetRequest, MonthKey},
    endpoints::{self, format_endpoint},
    form_mode::{FormMode, FormQuery, edit_form_url, new_form_url},
    html::{
        CARD_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, amount_style, base,
        currency_input_styles, edit_delete_action_links, form_card, form_field, format_currency,
        list_page_header, stat_card, submit_button,
    },
    navigation::NavBar,
    report::bar_width,
    timezone::local_today,
    transaction::{TransactionType, category_options},
};

/// The state needed for the budgets page and its endpoints.
#[derive(Debug, Clone)]
pub struct BudgetState {
    pub api_client: ApiClient,
    /// The canonical timezone name used to decide the current month.
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl BudgetState {
    fn current_month(&self) -> Result<MonthKey, Error> {
        local_today(&self.local_timezone)
            .map(MonthKey::of)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))
    }
}

pub(super) const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this budget?";

/// The heading for a month, e.g. "October 2025".
fn month_label(month: MonthKey) -> String {
    format!("{} {}", month.month, month.year)
}

fn budget_form(mode: &FormMode<Budget>, current_month: MonthKey) -> Markup {
    let (title, hx_post, hx_put, request, button_label) = match mode {
        FormMode::Hidden => return html!(),
        FormMode::Creating => (
            "Add New Budget",
            Some(endpoints::BUDGETS_API.to_owned()),
            None,
            None,
            "Create Budget",
        ),
        FormMode::Editing(budget) => (
            "Edit Budget",
            None,
            Some(format_endpoint(endpoints::BUDGET, budget.id)),
            Some(BudgetRequest::from(budget)),
            "Update Budget",
        ),
    };
    let category = request.as_ref().map_or("", |request| request.category.as_str());
    let month = request.as_ref().map_or(current_month, |request| request.month);

    let form = html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4"
        {
            (form_field("Category", "category", html! {
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE) required
                {
                    (category_options(TransactionType::Expense, category))
                }
            }))

            (form_field("Budget Amount", "amount", html! {
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
                        value=[request.as_ref().map(|request| request.amount)];
                }
            }))

            (form_field("Month", "month", html! {
                input
                    type="month"
                    name="month"
                    id="month"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(month);
            }))

            (submit_button(button_label))
        }
    };

    form_card(title, endpoints::BUDGETS_VIEW, form)
}

fn overview(budgets: &[Budget], month: MonthKey) -> Markup {
    let total_budget: f64 = budgets.iter().map(|budget| budget.amount).sum();
    let total_spent: f64 = budgets.iter().map(|budget| budget.spent).sum();
    let remaining = total_budget - total_spent;

    html! {
        section id="budget-overview" class="mb-6"
        {
            h2 class="mb-3 text-lg font-semibold" { (month_label(month)) " Overview" }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4"
            {
                (stat_card("Total Budget", &format_currency(total_budget), ""))
                (stat_card("Total Spent", &format_currency(total_spent), ""))
                (stat_card("Remaining", &format_currency(remaining), amount_style(remaining)))
            }
        }
    }
}

fn budget_card(budget: &Budget) -> Markup {
    let percentage = budget.percentage_used();
    let status = budget.status();
    let remaining = budget.remaining();

    html! {
        li class=(CARD_STYLE)
        {
            div class="flex justify-between items-start"
            {
                div
                {
                    h3 class="text-lg font-semibold" { (budget.category) }
                    p class="text-sm text-gray-500 dark:text-gray-400" { (month_label(budget.month)) }
                }

                span class={ "text-sm font-semibold " (status.text_style()) } data-status="true"
                {
                    (status.label())
                }
            }

            p class="mt-3 text-sm tabular-nums"
            {
                (format_currency(budget.spent)) " of " (format_currency(budget.amount))
            }

            div
                class="mt-2 w-full h-2.5 rounded-full bg-gray-200 dark:bg-gray-700"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=(format!("{:.0}", bar_width(percentage)))
            {
                div
                    class={ "h-2.5 rounded-full " (status.bar_style()) }
                    style=(format!("width: {:.1}%", bar_width(percentage)))
                {}
            }

            div class="mt-2 flex justify-between text-sm"
            {
                span class="text-gray-500 dark:text-gray-400" { (format!("{percentage:.1}% used")) }
                span class={ "font-semibold tabular-nums " (amount_style(remaining)) } data-remaining="true"
                {
                    (format_currency(remaining.abs()))
                    @if remaining < 0.0 { " over" } @else { " left" }
                }
            }

            div class="mt-4 flex items-center gap-4 text-sm"
            {
                (edit_delete_action_links(
                    &edit_form_url(endpoints::BUDGETS_VIEW, budget.id),
                    &format_endpoint(endpoints::BUDGET, budget.id),
                    DELETE_CONFIRM_MESSAGE,
                ))
            }
        }
    }
}

fn budgets_view(
    session: &Session,
    budgets: &[Budget],
    mode: &FormMode<Budget>,
    current_month: MonthKey,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW, &session.name).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl"
            {
                (list_page_header("Monthly Budgets", "Add Budget", &new_form_url(endpoints::BUDGETS_VIEW)))

                (budget_form(mode, current_month))

                (overview(budgets, current_month))

                ul id="budgets" class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    @for budget in budgets {
                        (budget_card(budget))
                    }
                }

                @if budgets.is_empty() {
                    p class="py-10 text-center text-gray-500 dark:text-gray-400"
                    {
                        "No budgets set yet. Click \"Add Budget\" to start tracking your spending!"
                    }
                }
            }
        }
    );

    base("Budgets", &[currency_input_styles()], &content)
}

/// Renders the budgets page for the current month.
///
/// If the budgets cannot be loaded the page is shown without any.
pub async fn get_budgets_page(
    State(state): State<BudgetState>,
    Extension(session): Extension<Session>,
    Query(query): Query<FormQuery>,
) -> Response {
    let current_month = match state.current_month() {
        Ok(month) => month,
        Err(error) => return error.into_response(),
    };

    let budgets = state
        .api_client
        .get_current_month_budgets(&session)
        .await
        .inspect_err(|error| tracing::error!("Could not load budgets: {error}"))
        .unwrap_or_default();

    let mode = query.resolve(&budgets, |budget| budget.id);

    budgets_view(&session, &budgets, &mode, current_month).into_response()
}

#[cfg(test)]
mod budgets_page_tests {
    use axum::{
        Extension,
        extract::{FromRef, Query, State},
    };
    use scraper::Html;
    use time::macros::date;

    use crate::{
        account::{AccountRequest, AccountType},
        budget::{BudgetRequest, MonthKey},
        endpoints,
        form_mode::FormQuery,
        test_utils::{
            MockApi, assert_form_input, assert_form_select, assert_form_submit_button,
            assert_hx_endpoint, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document, select_texts, test_session,
        },
        transaction::{TransactionRequest, TransactionType},
    };

    use super::{BudgetState, get_budgets_page, month_label};

    fn this_month(api: &MockApi) -> MonthKey {
        MonthKey::of(api.app_state().today().unwrap())
    }

    /// A 1,000 food budget with 950 spent and a 2,000 bills budget with 500
    /// spent, both for the current month.
    async fn seed(api: &MockApi) -> i64 {
        let client = api.client();
        let session = test_session();
        let month = this_month(api);
        let today = api.app_state().today().unwrap();

        let account_id = client
            .create_account(
                &AccountRequest {
                    name: "Main".to_owned(),
                    account_type: AccountType::Checking,
                    balance: 10000.0,
                },
                &session,
            )
            .await
            .unwrap()
            .id;
        for (category, amount) in [("Food", 950.0), ("Bills", 500.0)] {
            client
                .create_transaction(
                    &TransactionRequest {
                        account_id,
                        transaction_type: TransactionType::Expense,
                        category: category.to_owned(),
                        amount,
                        description: None,
                        transaction_date: today,
                    },
                    &session,
                )
                .await
                .unwrap();
        }

        let food = client
            .create_budget(
                &BudgetRequest {
                    category: "Food".to_owned(),
                    amount: 1000.0,
                    month,
                },
                &session,
            )
            .await
            .unwrap();
        client
            .create_budget(
                &BudgetRequest {
                    category: "Bills".to_owned(),
                    amount: 2000.0,
                    month,
                },
                &session,
            )
            .await
            .unwrap();

        food.id
    }

    async fn render(api: &MockApi, query: FormQuery) -> Html {
        let state = BudgetState::from_ref(&api.app_state());
        let response =
            get_budgets_page(State(state), Extension(test_session()), Query(query)).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    #[tokio::test]
    async fn shows_overview_and_budget_status() {
        let api = MockApi::spawn().await;
        seed(&api).await;
        let month = this_month(&api);

        let html = render(&api, FormQuery::default()).await;

        assert_eq!(
            select_texts(&html, "#budget-overview h2"),
            [format!("{} Overview", month_label(month))]
        );
        assert_eq!(
            select_texts(&html, "#budget-overview p.text-2xl"),
            ["₹3,000.00", "₹1,450.00", "₹1,550.00"]
        );
        assert_eq!(select_texts(&html, "#budgets h3"), ["Food", "Bills"]);
        assert_eq!(
            select_texts(&html, "#budgets [data-status]"),
            ["Over Budget", "On Track"]
        );
        assert_eq!(
            select_texts(&html, "#budgets [data-remaining]"),
            ["₹50.00 left", "₹1,500.00 left"]
        );
    }

    #[tokio::test]
    async fn shows_empty_message() {
        let api = MockApi::spawn().await;

        let html = render(&api, FormQuery::default()).await;

        assert_eq!(
            select_texts(&html, "p.py-10"),
            ["No budgets set yet. Click \"Add Budget\" to start tracking your spending!"]
        );
    }

    #[tokio::test]
    async fn new_form_defaults_to_current_month() {
        let api = MockApi::spawn().await;
        let month = this_month(&api);

        let html = render(
            &api,
            FormQuery {
                form: Some("new".to_owned()),
                edit: None,
            },
        )
        .await;

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::BUDGETS_API, "hx-post");
        assert_form_select(&form, "category", "");
        assert_form_input(&form, "amount", "number", None);
        assert_form_input(&form, "month", "month", Some(&month.to_string()));
        assert_form_submit_button(&form, "Create Budget");
    }

    #[tokio::test]
    async fn edit_form_is_prefilled() {
        let api = MockApi::spawn().await;
        let food_id = seed(&api).await;

        let html = render(
            &api,
            FormQuery {
                form: None,
                edit: Some(food_id),
            },
        )
        .await;

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, &format!("/api/budgets/{food_id}"), "hx-put");
        assert_form_select(&form, "category", "Food");
        assert_form_input(&form, "amount", "number", Some("1000"));
        assert_form_submit_button(&form, "Update Budget");
    }

    #[test]
    fn month_label_uses_full_month_name() {
        assert_eq!(month_label(MonthKey::of(date!(2025 - 10 - 15))), "October 2025");
    }
}
