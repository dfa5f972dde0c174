use chrono::{Local, NaiveDate};

use crate::ledger::MonthKey;

/// Clock abstracts access to the current date so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate;

    /// Returns the month key for `today()`.
    fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.today())
    }
}

/// Real-time clock backed by the system's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Pins the clock to the first day of `year-month`. Returns `None` for invalid months.
    pub fn at_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_month_key() {
        let clock = FixedClock::at_month(2024, 2).unwrap();
        assert_eq!(clock.month_key().to_string(), "2024-2");
        assert!(FixedClock::at_month(2024, 13).is_none());
    }
}
