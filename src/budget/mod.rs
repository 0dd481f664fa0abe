//! Monthly spending caps per category.

mod budgets_page;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;

pub use budgets_page::get_budgets_page;
pub use core::{Budget, BudgetId, BudgetRequest, MonthKey};
pub use create_endpoint::create_budget_endpoint;
pub use delete_endpoint::delete_budget_endpoint;
pub use edit_endpoint::edit_budget_endpoint;
