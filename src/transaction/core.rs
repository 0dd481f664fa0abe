//! Defines the core data models for transactions as exchanged with the API.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::account::{Account, AccountId};

pub type TransactionId = i64;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// The value used on the wire and in form fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// Parse the wire value, e.g. "EXPENSE".
    pub fn parse(value: &str) -> Option<Self> {
        TransactionType::ALL
            .into_iter()
            .find(|transaction_type| transaction_type.as_str().eq_ignore_ascii_case(value))
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "iso_date")]
    pub transaction_date: Date,
    /// When the transaction was recorded, as sent by the API.
    #[serde(default)]
    pub created_at: Option<String>,
    /// The account the transaction belongs to.
    #[serde(default)]
    pub account: Option<Account>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    #[cfg(test)]
    pub fn build(
        transaction_type: TransactionType,
        amount: f64,
        category: &str,
        transaction_date: Date,
    ) -> TransactionBuilder {
        TransactionBuilder {
            transaction_type,
            amount,
            category: category.to_owned(),
            transaction_date,
            description: None,
        }
    }

    /// The amount with the sign of its effect on the balance: negative for
    /// expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// A builder for creating [Transaction] fixtures.
#[cfg(test)]
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub transaction_date: Date,
    pub description: Option<String>,
}

#[cfg(test)]
impl TransactionBuilder {
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    pub fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            transaction_type: self.transaction_type,
            amount: self.amount,
            category: self.category,
            description: self.description,
            transaction_date: self.transaction_date,
            created_at: None,
            account: None,
        }
    }
}

/// The data sent to the API to create or update a transaction.
///
/// Also used as the form data submitted from the transactions page, so the
/// form fields use the same camelCase names as the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub account_id: AccountId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "iso_date")]
    pub transaction_date: Date,
}

impl TransactionRequest {
    /// Trim the free text fields and drop an empty description.
    pub fn normalise(mut self) -> Self {
        self.category = self.category.trim().to_owned();
        self.description = self
            .description
            .map(|description| description.trim().to_owned())
            .filter(|description| !description.is_empty());
        self
    }
}

/// The query for transactions within an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
}
