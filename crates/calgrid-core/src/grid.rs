//! Month grid generation and month navigation.
//!
//! A month grid is a flat, row-major sequence of week rows starting on
//! Sunday. Leading padding cells precede day 1, and trailing padding cells
//! complete the last week row only; the grid is never forced to six rows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::types::{DateKey, ValidationError, is_dashed_digits};

/// A displayed month, identified by year and zero-based month index.
///
/// Years are limited to [`DateKey::YEARS`], so every day of a month has a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// Creates a month from a year and a zero-based month index (`0` = January).
    pub fn new(year: i32, month_index: u32) -> Result<Self, ValidationError> {
        month_index
            .checked_add(1)
            .and_then(|month| NaiveDate::from_ymd_opt(year, month, 1))
            .and_then(Self::bounded)
            .ok_or_else(|| ValidationError::InvalidMonth {
                value: format!("{year}/{month_index}"),
            })
    }

    /// The month containing `date`, or `None` outside the supported years.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        date.with_day(1).and_then(Self::bounded)
    }

    fn bounded(first: NaiveDate) -> Option<Self> {
        DateKey::YEARS
            .contains(&first.year())
            .then_some(Self { first })
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// Zero-based month index.
    pub fn month_index(self) -> u32 {
        self.first.month0()
    }

    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Number of days in the month.
    pub fn days_in_month(self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| u32::try_from((next - self.first).num_days()).ok())
            .unwrap_or(31)
    }

    /// Weekday of day 1, counted from Sunday (`0`) to Saturday (`6`).
    pub fn first_weekday(self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// The preceding month, saturating at January of the first supported year.
    #[must_use]
    pub fn previous(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .and_then(Self::bounded)
            .unwrap_or(self)
    }

    /// The following month, saturating at December of the last supported year.
    #[must_use]
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(Self::bounded)
            .unwrap_or(self)
    }

    /// Returns true if `key` falls in this month's year and month.
    pub fn contains(self, key: &DateKey) -> bool {
        key.year() == self.year() && key.month() == self.first.month()
    }

    /// Human-readable label, e.g. `March 2024`.
    pub fn label(self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Download file name for an export of this month, e.g. `events-2024-3.csv`.
    pub fn export_file_name(self, extension: &str) -> String {
        format!(
            "events-{}-{}.{extension}",
            self.year(),
            self.month_index() + 1
        )
    }
}

impl FromStr for CalendarMonth {
    type Err = ValidationError;

    /// Parses `YYYY-MM` with a 1-based, two-digit month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonth {
            value: s.to_string(),
        };
        if !is_dashed_digits(s, 7, &[4]) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .ok()
            .and_then(Self::bounded)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

/// One slot of a month grid, either a real day or padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    /// Day of month for current-month cells; a placeholder count for
    /// trailing padding; `None` for leading padding.
    pub day_number: Option<u32>,
    pub is_current_month: bool,
    /// Set only for current-month cells.
    pub date: Option<NaiveDate>,
}

impl CalendarCell {
    const fn padding(day_number: Option<u32>) -> Self {
        Self {
            day_number,
            is_current_month: false,
            date: None,
        }
    }

    /// Store key for this cell; padding cells never key into the store.
    pub fn key(&self) -> Option<DateKey> {
        self.date.and_then(|date| DateKey::encode(date).ok())
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == Some(today)
    }

    pub fn is_weekend(&self) -> bool {
        self.date
            .is_some_and(|date| matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
    }
}

/// Generates the grid cells for `month`.
pub fn month_grid(month: CalendarMonth) -> Vec<CalendarCell> {
    let mut cells = Vec::with_capacity(42);

    for _ in 0..month.first_weekday() {
        cells.push(CalendarCell::padding(None));
    }

    for day in 1..=month.days_in_month() {
        if let Some(date) = month.first_day().with_day(day) {
            cells.push(CalendarCell {
                day_number: Some(day),
                is_current_month: true,
                date: Some(date),
            });
        }
    }

    let trailing = (7 - cells.len() % 7) % 7;
    for day in (1_u32..).take(trailing) {
        cells.push(CalendarCell::padding(Some(day)));
    }

    cells
}
