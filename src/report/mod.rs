//! Reporting over the user's transactions and budgets.
//!
//! The figures are computed by pure functions over the lists fetched from the
//! API, so every page load recomputes them from fresh data.

mod aggregation;
mod charts;
mod reports_page;
mod time_range;

pub use aggregation::{
    BudgetStatus, CategoryAmount, Totals, bar_width, budget_usage, category_breakdown,
    filter_by_range, totals,
};
pub use reports_page::get_reports_page;
pub use time_range::TimeRange;
