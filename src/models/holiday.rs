//! Public holiday model.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A non-working public holiday.
///
/// The working calendar only counts holidays per calendar year, so `year`
/// is carried alongside the date for cheap filtering.
///
/// # Example
///
/// ```
/// use agency_cost_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday::new(NaiveDate::from_ymd_opt(2026, 12, 2).unwrap(), "National Day");
/// assert_eq!(holiday.year, 2026);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The calendar year the holiday counts against.
    pub year: i32,
    /// The name of the holiday.
    #[serde(default)]
    pub name: String,
}

impl Holiday {
    /// Creates a holiday, deriving `year` from `date`.
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            year: date.year(),
            name: name.into(),
        }
    }
}

/// Returns the holidays that count against `year`.
pub fn holidays_in_year(holidays: &[Holiday], year: i32) -> impl Iterator<Item = &Holiday> {
    holidays.iter().filter(move |h| h.year == year)
}
