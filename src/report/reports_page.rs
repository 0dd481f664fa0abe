//! The reports page: income and expense totals over a time range, category
//! breakdowns with charts, and how this month's budgets are holding up.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Deserializer};
use time::Date;

use crate::{
    AppState, Error,
    api::ApiClient,
    auth::Session,
    budget::Budget,
    endpoints,
    html::{
        CARD_STYLE, HeadElement, NEGATIVE_AMOUNT_STYLE, PAGE_CONTAINER_STYLE,
        POSITIVE_AMOUNT_STYLE, amount_style, base, format_currency, stat_card,
    },
    navigation::NavBar,
    report::{
        CategoryAmount, TimeRange, Totals, bar_width, category_breakdown,
        charts::{ECHARTS_SCRIPT, ReportChart, breakdown_chart, charts_script, charts_view},
        filter_by_range, totals,
    },
    timezone::local_today,
    transaction::{Transaction, TransactionType, category_color},
};

/// The state needed for the reports page.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub api_client: ApiClient,
    /// The canonical timezone name that report windows are measured in.
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(default, deserialize_with = "deserialize_range")]
    pub range: TimeRange,
}

/// Read the `range` parameter, falling back to this month for values that
/// name no time range.
fn deserialize_range<'de, D>(deserializer: D) -> Result<TimeRange, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    match TimeRange::ALL.into_iter().find(|range| range.as_str() == raw) {
        Some(range) => Ok(range),
        None => {
            tracing::warn!("Ignoring unknown report range {raw:?}");
            Ok(TimeRange::default())
        }
    }
}

/// Everything the reports page is drawn from.
#[derive(Debug, Default)]
struct ReportData {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    total_balance: f64,
}

fn range_links(selected: TimeRange) -> Markup {
    html! {
        nav id="time-range" class="flex flex-wrap gap-2 mb-6" aria-label="Time range"
        {
            @for range in TimeRange::ALL {
                @let is_active = range == selected;

                a
                    href={ (endpoints::REPORTS_VIEW) "?range=" (range.as_str()) }
                    aria-current=[is_active.then_some("page")]
                    class=(if is_active {
                        "px-3 py-2 rounded text-white bg-blue-600"
                    } else {
                        "px-3 py-2 rounded bg-gray-100 dark:bg-gray-700 hover:bg-gray-200"
                    })
                {
                    (range.label())
                }
            }
        }
    }
}

fn metric_cards(totals: Totals, total_balance: f64) -> Markup {
    let net_income = totals.net_income();

    html! {
        section id="metrics" class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-6"
        {
            (stat_card("Total Income", &format_currency(totals.income), POSITIVE_AMOUNT_STYLE))
            (stat_card("Total Expenses", &format_currency(totals.expenses), NEGATIVE_AMOUNT_STYLE))
            (stat_card("Net Income", &format_currency(net_income), amount_style(net_income)))
            (stat_card("Current Balance", &format_currency(total_balance), amount_style(total_balance)))
        }
    }
}

fn breakdown_list(id: &str, title: &str, breakdown: &[CategoryAmount], empty_message: &str) -> Markup {
    html! {
        section id=(id) class=(CARD_STYLE)
        {
            h2 class="mb-4 text-lg font-semibold" { (title) }

            @if breakdown.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { (empty_message) }
            }

            ul class="space-y-3"
            {
                @for category in breakdown {
                    li
                    {
                        div class="flex justify-between text-sm"
                        {
                            span class="font-medium" { (category.category) }
                            span class="tabular-nums"
                            {
                                (format_currency(category.amount))
                                " (" (format!("{:.1}%", category.percentage)) ")"
                            }
                        }

                        div class="mt-1 w-full h-2 rounded-full bg-gray-200 dark:bg-gray-700"
                        {
                            div
                                class="h-2 rounded-full"
                                style=(format!(
                                    "width: {:.1}%; background-color: {}",
                                    bar_width(category.percentage),
                                    category_color(&category.category),
                                ))
                            {}
                        }
                    }
                }
            }
        }
    }
}

fn budget_performance(budgets: &[Budget]) -> Markup {
    html! {
        section id="budget-performance" class="mb-6"
        {
            h2 class="mb-3 text-lg font-semibold" { "Budget Performance" }

            @if budgets.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No budgets set for this month." }
            }

            ul class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4"
            {
                @for budget in budgets {
                    @let status = budget.status();

                    li class={ "border-l-4 " (CARD_STYLE) " " (status.text_style()) }
                    {
                        h3 class="font-semibold text-gray-900 dark:text-white" { (budget.category) }
                        p class="text-sm text-gray-600 dark:text-gray-300 tabular-nums"
                        {
                            (format_currency(budget.spent)) " / " (format_currency(budget.amount))
                        }
                        p class="mt-1 text-sm font-semibold" data-usage="true"
                        {
                            (format!("{:.0}% used • {}", budget.percentage_used(), status.short_label()))
                        }
                    }
                }
            }
        }
    }
}

fn no_data_panel() -> Markup {
    html! {
        section id="no-data" class={ "text-center py-10 " (CARD_STYLE) }
        {
            p class="text-gray-500 dark:text-gray-400"
            {
                "No transaction data available yet. Start adding transactions to see your financial reports!"
            }
        }
    }
}

fn reports_view(session: &Session, data: &ReportData, range: TimeRange, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW, &session.name).into_html();
    let in_range = filter_by_range(&data.transactions, range, today);
    let totals = totals(&in_range);
    let expenses = category_breakdown(&in_range, TransactionType::Expense);
    let income = category_breakdown(&in_range, TransactionType::Income);

    let mut charts = Vec::new();
    if !expenses.is_empty() {
        charts.push(ReportChart {
            id: "expense-chart",
            options: breakdown_chart("Expenses by Category", &expenses).to_string(),
        });
    }
    if !income.is_empty() {
        charts.push(ReportChart {
            id: "income-chart",
            options: breakdown_chart("Income by Category", &income).to_string(),
        });
    }

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-6xl"
            {
                header class="mb-4"
                {
                    h1 class="text-2xl font-bold" { "Financial Reports" }
                }

                (range_links(range))

                (metric_cards(totals, data.total_balance))

                @if data.transactions.is_empty() {
                    (no_data_panel())
                } @else {
                    (charts_view(&charts))

                    div class="grid grid-cols-1 lg:grid-cols-2 gap-4 mb-6"
                    {
                        (breakdown_list(
                            "expense-breakdown",
                            "Expense Breakdown",
                            &expenses,
                            "No expenses in this period.",
                        ))
                        (breakdown_list(
                            "income-breakdown",
                            "Income Breakdown",
                            &income,
                            "No income in this period.",
                        ))
                    }

                    (budget_performance(&data.budgets))
                }
            }
        }
    );

    let head_elements = if charts.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
            charts_script(&charts),
        ]
    };

    base("Reports", &head_elements, &content)
}

/// Renders the reports page for the `range` query parameter, defaulting to
/// this month.
///
/// If the data cannot be loaded the page is shown without any.
pub async fn get_reports_page(
    State(state): State<ReportState>,
    Extension(session): Extension<Session>,
    Query(query): Query<RangeQuery>,
) -> Response {
    let Some(today) = local_today(&state.local_timezone) else {
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let loaded = tokio::try_join!(
        state.api_client.get_all_transactions(&session),
        state.api_client.get_current_month_budgets(&session),
        state.api_client.get_total_balance(&session),
    );
    let data = match loaded {
        Ok((transactions, budgets, total_balance)) => ReportData {
            transactions,
            budgets,
            total_balance,
        },
        Err(error) => {
            tracing::error!("Could not load report data: {error}");
            ReportData::default()
        }
    };

    reports_view(&session, &data, query.range, today).into_response()
}
