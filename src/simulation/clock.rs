//! Sources of "today".
//!
//! The engine never asks the system for the date. Callers read one of these
//! and pass the value in.

use chrono::{Duration, NaiveDate};

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// The local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A manually driven clock for tests, demos and scripted runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn set(&mut self, date: NaiveDate) {
        self.today = date;
    }

    /// Move the clock by `days` (negative moves it back), saturating at the
    /// calendar limits.
    pub fn advance_days(&mut self, days: i64) -> NaiveDate {
        let fallback = if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        };
        self.today = Duration::try_days(days)
            .and_then(|delta| self.today.checked_add_signed(delta))
            .unwrap_or(fallback);
        self.today
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
