//! The suggested categories for each transaction type and their colours.

use crate::transaction::TransactionType;

pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Healthcare",
    "Education",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 6] =
    ["Salary", "Freelance", "Investment", "Gift", "Refund", "Other"];

/// The colour for categories without an entry in the palette.
pub const FALLBACK_COLOR: &str = "#6b7280";

/// The categories offered in forms for `transaction_type`.
///
/// These are suggestions only, the API accepts any category.
pub fn categories_for(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Expense => &EXPENSE_CATEGORIES,
        TransactionType::Income => &INCOME_CATEGORIES,
    }
}

/// The hex colour used for `category` in charts and breakdown bars.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Food" => "#ef4444",
        "Transport" => "#f59e0b",
        "Shopping" => "#ec4899",
        "Bills" => "#8b5cf6",
        "Entertainment" => "#06b6d4",
        "Healthcare" => "#10b981",
        "Education" => "#3b82f6",
        "Salary" => "#22c55e",
        "Freelance" => "#06b6d4",
        "Investment" => "#8b5cf6",
        "Gift" => "#ec4899",
        "Refund" => "#f59e0b",
        _ => FALLBACK_COLOR,
    }
}
