//! Calendar month keys in the `YYYY-MM` form budgets are filed under.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthKeyError {
    #[error("expected a YYYY-MM month, got `{0}`")]
    InvalidFormat(String),
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
}

/// A calendar month. Orders chronologically and renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Builds a key from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month an instant falls in, as seen from the given time zone.
    pub fn of<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> Self {
        let local = instant.with_timezone(tz);
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    /// The month the clock currently reads in the given time zone.
    pub fn current<Tz: TimeZone>(tz: &Tz) -> Self {
        Self::of(&Utc::now(), tz)
    }

    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Utc>, tz: &Tz) -> bool {
        Self::of(instant, tz) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let invalid = || MonthKeyError::InvalidFormat(trimmed.to_string());
        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}
