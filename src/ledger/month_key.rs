use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};

use crate::errors::TrackerError;

/// Calendar month marker rendered as `YEAR-MONTH` with an unpadded, one-based month.
///
/// Parsing also accepts a zero-padded month (`2024-03`) so keys written by older
/// snapshots compare equal to the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let (year, month) = raw.trim().split_once('-')?;
        if !is_ascii_number(year) || !is_ascii_number(month) {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// True when a stored marker refers to this month.
    pub fn matches(&self, stored: Option<&str>) -> bool {
        stored.and_then(Self::parse) == Some(*self)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| TrackerError::InvalidInput(format!("`{s}` is not a YEAR-MONTH key")))
    }
}

fn is_ascii_number(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
