//! Core type definitions with validation.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A time was not in `HH:MM` form or was out of range.
    #[error("invalid time {value:?}, expected HH:MM")]
    InvalidTime { value: String },

    /// The end of an interval did not come after its start.
    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart { start: TimeOfDay, end: TimeOfDay },

    /// A date key was not a canonical `YYYY-MM-DD` calendar date.
    #[error("invalid date key {value:?}, expected YYYY-MM-DD")]
    InvalidDateKey { value: String },

    /// A month was not a valid `YYYY-MM` value or month index.
    #[error("invalid month {value:?}")]
    InvalidMonth { value: String },

    /// Unknown event category.
    #[error("unknown category: {value}")]
    UnknownCategory { value: String },
}

/// Canonical `YYYY-MM-DD` key identifying one calendar day.
///
/// Two dates that normalize to the same calendar day always produce the same
/// key, and keys order chronologically. Only canonical text is accepted when
/// parsing: `2024-3-5` is rejected even though it names a real day. Years are
/// limited to [`DateKey::YEARS`] so every key has a four-digit year.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey {
    key: String,
    date: NaiveDate,
}

impl DateKey {
    /// Years a key can name.
    pub const YEARS: RangeInclusive<i32> = 0..=9999;

    /// Encodes a calendar date as its canonical key.
    pub fn encode(date: NaiveDate) -> Result<Self, ValidationError> {
        if !Self::YEARS.contains(&date.year()) {
            return Err(ValidationError::InvalidDateKey {
                value: date.to_string(),
            });
        }
        Ok(Self {
            key: date.format("%Y-%m-%d").to_string(),
            date,
        })
    }

    /// Returns the calendar date this key names.
    pub const fn decode(&self) -> NaiveDate {
        self.date
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Calendar year of the keyed day.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// 1-based calendar month of the keyed day.
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// Returns true if `s` is `len` ASCII bytes, with `-` at exactly the offsets in
/// `dashes` and digits everywhere else.
pub(crate) fn is_dashed_digits(s: &str, len: usize, dashes: &[usize]) -> bool {
    s.len() == len
        && s.bytes().enumerate().all(|(i, b)| {
            if dashes.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_digit()
            }
        })
}

impl FromStr for DateKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDateKey {
            value: s.to_string(),
        };
        if !is_dashed_digits(s, 10, &[4, 7]) {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
        let key = Self::encode(date)?;
        if key.key != s {
            return Err(invalid());
        }
        Ok(key)
    }
}

impl TryFrom<String> for DateKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.key
    }
}

impl TryFrom<NaiveDate> for DateKey {
    type Error = ValidationError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::encode(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

/// A wall-clock time within one day, held as minutes since midnight.
///
/// Parsed from and rendered as `HH:MM`; comparisons use the minute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self(0);

    const MINUTES_PER_DAY: u16 = 24 * 60;

    /// Creates a time from an hour (`0..=23`) and minute (`0..=59`).
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Creates a time from minutes since midnight.
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < Self::MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    pub const fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: s.to_string(),
        };
        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        let well_formed = (1..=2).contains(&hours.len())
            && minutes.len() == 2
            && hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }
        let hour: u16 = hours.parse().map_err(|_| invalid())?;
        let minute: u16 = minutes.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// The closed set of event categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Others,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Work, Self::Personal, Self::Others];

    /// String representation used in snapshots and exports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Others => "others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "others" => Ok(Self::Others),
            _ => Err(ValidationError::UnknownCategory {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========== DateKey Tests ==========

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(DateKey::encode(date(2024, 3, 5)).unwrap().as_str(), "2024-03-05");
        assert_eq!(DateKey::encode(date(987, 12, 31)).unwrap().as_str(), "0987-12-31");
        assert_eq!(DateKey::encode(date(0, 1, 1)).unwrap().as_str(), "0000-01-01");
    }

    #[test]
    fn date_key_encode_refuses_years_without_four_digits() {
        assert!(DateKey::encode(date(9999, 12, 31)).is_ok());
        assert!(matches!(
            DateKey::encode(date(10000, 1, 1)),
            Err(ValidationError::InvalidDateKey { .. })
        ));
        assert!(DateKey::encode(date(-1, 12, 31)).is_err());
        assert!(DateKey::try_from(date(10000, 1, 1)).is_err());
    }

    #[test]
    fn date_key_rejects_signed_or_long_years() {
        for value in ["+10000-01-01", "10000-01-01", "-0001-01-01", "+2024-03-05", " 2024-03-05"] {
            assert_eq!(
                value.parse::<DateKey>(),
                Err(ValidationError::InvalidDateKey {
                    value: value.to_string()
                }),
                "{value:?} should not parse"
            );
        }
    }

    #[test]
    fn date_key_decodes_to_same_day() {
        let key: DateKey = "2024-02-29".parse().unwrap();
        assert_eq!(key.decode(), date(2024, 2, 29));
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 2);
    }

    #[test]
    fn date_key_rejects_non_canonical_text() {
        assert!("2024-3-5".parse::<DateKey>().is_err());
        assert!("2023-02-29".parse::<DateKey>().is_err());
        assert!("2024-03-05T00:00".parse::<DateKey>().is_err());
        assert!("".parse::<DateKey>().is_err());
    }

    #[test]
    fn date_key_orders_chronologically() {
        let earlier: DateKey = "2023-12-31".parse().unwrap();
        let later: DateKey = "2024-01-01".parse().unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn date_key_serde_roundtrip() {
        let key: DateKey = "2024-06-01".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-06-01\"");
        let parsed: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
        assert!(serde_json::from_str::<DateKey>("\"2024-6-1\"").is_err());
        assert!(serde_json::from_str::<DateKey>("\"+10000-01-01\"").is_err());
    }

    // ========== TimeOfDay Tests ==========

    #[test]
    fn time_parses_to_minutes() {
        assert_eq!("00:00".parse::<TimeOfDay>().unwrap().minutes(), 0);
        assert_eq!("10:30".parse::<TimeOfDay>().unwrap().minutes(), 630);
        assert_eq!("9:05".parse::<TimeOfDay>().unwrap().minutes(), 545);
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().minutes(), 1439);
    }

    #[test]
    fn time_rejects_malformed_values() {
        for value in ["", "24:00", "12:60", "12", "12:5", "ab:cd", "-1:00", "123:00"] {
            assert!(
                value.parse::<TimeOfDay>().is_err(),
                "{value:?} should not parse"
            );
        }
    }

    #[test]
    fn time_displays_zero_padded() {
        assert_eq!("9:05".parse::<TimeOfDay>().unwrap().to_string(), "09:05");
        assert_eq!(TimeOfDay::MIDNIGHT.to_string(), "00:00");
    }

    #[test]
    fn time_bounds() {
        assert!(TimeOfDay::from_hm(23, 59).is_some());
        assert!(TimeOfDay::from_hm(24, 0).is_none());
        assert!(TimeOfDay::from_minutes(1439).is_some());
        assert!(TimeOfDay::from_minutes(1440).is_none());
    }

    // ========== Category Tests ==========

    #[test]
    fn category_from_str() {
        assert_eq!("work".parse::<Category>().unwrap(), Category::Work);
        assert_eq!("personal".parse::<Category>().unwrap(), Category::Personal);
        assert_eq!("others".parse::<Category>().unwrap(), Category::Others);
        assert!("Work".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_lowercase() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        assert!(serde_json::from_str::<Category>("\"holiday\"").is_err());
    }

    #[test]
    fn category_defaults_to_work() {
        assert_eq!(Category::default(), Category::Work);
    }
}
