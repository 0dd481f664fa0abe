//! The time windows transactions can be reported over.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// A reporting window relative to today.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "THIS_MONTH")]
    ThisMonth,
    #[serde(rename = "LAST_MONTH")]
    LastMonth,
    #[serde(rename = "LAST_3_MONTHS")]
    LastThreeMonths,
    #[serde(rename = "THIS_YEAR")]
    ThisYear,
    #[serde(rename = "ALL_TIME")]
    AllTime,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::ThisMonth,
        TimeRange::LastMonth,
        TimeRange::LastThreeMonths,
        TimeRange::ThisYear,
        TimeRange::AllTime,
    ];

    /// The value used in the `range` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ThisMonth => "THIS_MONTH",
            TimeRange::LastMonth => "LAST_MONTH",
            TimeRange::LastThreeMonths => "LAST_3_MONTHS",
            TimeRange::ThisYear => "THIS_YEAR",
            TimeRange::AllTime => "ALL_TIME",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ThisMonth => "This Month",
            TimeRange::LastMonth => "Last Month",
            TimeRange::LastThreeMonths => "Last 3 Months",
            TimeRange::ThisYear => "This Year",
            TimeRange::AllTime => "All Time",
        }
    }

    /// Whether `date` falls in this window as seen from `today`.
    pub fn contains(&self, date: Date, today: Date) -> bool {
        match self {
            TimeRange::ThisMonth => {
                date.year() == today.year() && date.month() == today.month()
            }
            TimeRange::LastMonth => {
                let (year, month) = previous_month(today.year(), today.month());
                date.year() == year && date.month() == month
            }
            TimeRange::LastThreeMonths => date >= months_before(today, 3),
            TimeRange::ThisYear => date.year() == today.year(),
            TimeRange::AllTime => true,
        }
    }
}

fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}

/// The same day of the month `count` calendar months before `date`, clamped
/// to the last day of a shorter month.
fn months_before(date: Date, count: u8) -> Date {
    let (mut year, mut month) = (date.year(), date.month());
    for _ in 0..count {
        (year, month) = previous_month(year, month);
    }

    let mut day = date.day();
    loop {
        if let Ok(date) = Date::from_calendar_date(year, month, day) {
            return date;
        }
        // Every month has at least 28 days, so this terminates.
        day -= 1;
    }
}
