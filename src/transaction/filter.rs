//! Narrowing the transaction list by type and a free text search.

use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionType};

/// Which transaction types to show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "ALL",
            TypeFilter::Income => "INCOME",
            TypeFilter::Expense => "EXPENSE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Income => "Income",
            TypeFilter::Expense => "Expense",
        }
    }

    fn admits(&self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => transaction_type == TransactionType::Income,
            TypeFilter::Expense => transaction_type == TransactionType::Expense,
        }
    }
}

/// The filters applied to the transactions page, read from its query string,
/// e.g. `?type=INCOME&search=rent`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default, rename = "type")]
    pub type_filter: TypeFilter,
    #[serde(default)]
    pub search: String,
}

impl TransactionFilter {
    /// Whether any filter would hide a transaction.
    pub fn is_active(&self) -> bool {
        self.type_filter != TypeFilter::All || !self.search.trim().is_empty()
    }

    /// A transaction matches when its type is admitted and the search is
    /// empty or found, ignoring case, in its category or description.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !self.type_filter.admits(transaction.transaction_type) {
            return false;
        }

        let search = self.search.trim().to_lowercase();
        if search.is_empty() {
            return true;
        }

        transaction.category.to_lowercase().contains(&search)
            || transaction
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&search))
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|transaction| self.matches(transaction))
            .collect()
    }
}
