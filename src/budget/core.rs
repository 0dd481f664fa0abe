//! Monthly budgets and the month they apply to.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{Date, Month};

use crate::report::{BudgetStatus, budget_usage};

pub type BudgetId = i64;

/// A calendar month, written "YYYY-MM" on the wire and in month inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: Month,
}

impl MonthKey {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month `date` falls in.
    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a month in the format YYYY-MM")]
pub struct InvalidMonthKey(String);

impl FromStr for MonthKey {
    type Err = InvalidMonthKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthKey(value.to_owned());

        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self::new(year, month))
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        value.parse().map_err(de::Error::custom)
    }
}

/// A monthly spending cap for a category, with the amount the API reports
/// as spent so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub category: String,
    /// The monthly allocation.
    pub amount: f64,
    #[serde(default)]
    pub spent: f64,
    pub month: MonthKey,
}

impl Budget {
    /// How much of the allocation is left, negative when overspent.
    pub fn remaining(&self) -> f64 {
        self.amount - self.spent
    }

    pub fn percentage_used(&self) -> f64 {
        budget_usage(self.spent, self.amount)
    }

    pub fn status(&self) -> BudgetStatus {
        BudgetStatus::from_percentage(self.percentage_used())
    }
}

/// The data sent to the API to create or update a budget.
///
/// Also used as the form data submitted from the budgets page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRequest {
    pub category: String,
    pub amount: f64,
    pub month: MonthKey,
}

impl From<&Budget> for BudgetRequest {
    fn from(budget: &Budget) -> Self {
        Self {
            category: budget.category.clone(),
            amount: budget.amount,
            month: budget.month,
        }
    }
}
