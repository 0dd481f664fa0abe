//! The URIs of the pages and endpoints this app serves.
//!
//! For endpoints that take a parameter, e.g., '/api/accounts/{account_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing and editing accounts.
pub const ACCOUNTS_VIEW: &str = "/accounts";
/// The page for listing, filtering and editing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for the current month's budgets.
pub const BUDGETS_VIEW: &str = "/budgets";
/// The page with income and expense reports.
pub const REPORTS_VIEW: &str = "/reports";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/login";
/// The route that logs out the current user.
pub const LOG_OUT: &str = "/logout";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for registering a new user.
pub const REGISTER_API: &str = "/api/register";
/// The route to create an account.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route to update or delete an account.
pub const ACCOUNT: &str = "/api/accounts/{account_id}";
/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route for the category options of a transaction type.
pub const TRANSACTION_CATEGORIES: &str = "/api/transaction_categories";
/// The route to create a budget.
pub const BUDGETS_API: &str = "/api/budgets";
/// The route to update or delete a budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
