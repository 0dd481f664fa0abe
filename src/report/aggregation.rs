//! Pure reductions of transaction lists into report figures.

use std::collections::HashMap;

use time::Date;

use crate::{
    report::TimeRange,
    transaction::{Transaction, TransactionType},
};

/// The share of a type's total that went to, or came from, one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
    /// Percentage of the type's total, from 0 to 100.
    pub percentage: f64,
}

/// Income and expense totals over a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    pub fn net_income(&self) -> f64 {
        self.income - self.expenses
    }
}

/// How close a budget is to being used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            BudgetStatus::Over
        } else if percentage >= 70.0 {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::Over => "Over Budget",
        }
    }

    /// The label used on the compact report cards.
    pub fn short_label(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "Good",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::Over => "Over",
        }
    }

    /// Tailwind background class for progress bars.
    pub fn bar_style(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "bg-emerald-500",
            BudgetStatus::Warning => "bg-amber-500",
            BudgetStatus::Over => "bg-red-500",
        }
    }

    /// Tailwind text and border classes for labels and cards.
    pub fn text_style(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "text-emerald-600 dark:text-emerald-400 border-emerald-500",
            BudgetStatus::Warning => "text-amber-600 dark:text-amber-400 border-amber-500",
            BudgetStatus::Over => "text-red-600 dark:text-red-400 border-red-500",
        }
    }
}

/// The percentage of `amount` used by `spent`, or zero when there is no
/// allocation to measure against.
pub fn budget_usage(spent: f64, amount: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }

    spent / amount * 100.0
}

/// Progress bar width for a usage percentage, never wider than the bar.
pub fn bar_width(percentage: f64) -> f64 {
    percentage.clamp(0.0, 100.0)
}

/// The transactions dated within `range` as seen from `today`.
pub fn filter_by_range(
    transactions: &[Transaction],
    range: TimeRange,
    today: Date,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| range.contains(transaction.transaction_date, today))
        .collect()
}

pub fn totals(transactions: &[&Transaction]) -> Totals {
    transactions
        .iter()
        .fold(Totals::default(), |mut totals, transaction| {
            match transaction.transaction_type {
                TransactionType::Income => totals.income += transaction.amount,
                TransactionType::Expense => totals.expenses += transaction.amount,
            }
            totals
        })
}

/// Sum the transactions of `transaction_type` per category, largest first.
///
/// Ties are ordered by category name. Returns an empty list when the type's
/// total is zero.
pub fn category_breakdown(
    transactions: &[&Transaction],
    transaction_type: TransactionType,
) -> Vec<CategoryAmount> {
    let mut sums: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
    {
        *sums.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let total: f64 = sums.values().sum();
    if total == 0.0 {
        return Vec::new();
    }

    let mut breakdown: Vec<CategoryAmount> = sums
        .into_iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.to_owned(),
            amount,
            percentage: amount / total * 100.0,
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    breakdown
}
