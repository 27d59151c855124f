//! Time source used for entry timestamps and day bucketing.
//!
//! # Invariants
//! - `now` is always UTC; local calendar days are derived, never stored.
//! - `local_day` is the only place a time zone is applied.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Source of the current instant and of the observer's calendar.
pub trait Clock {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day of `at` as seen by the observer.
    fn local_day(&self, at: DateTime<Utc>) -> NaiveDate;

    /// Observer's current calendar day.
    fn today(&self) -> NaiveDate {
        self.local_day(self.now())
    }
}

/// Wall clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_day(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

/// Frozen clock with an explicit UTC offset, for deterministic callers.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Frozen at `now`, bucketing days in UTC.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::with_offset(now, Utc.fix())
    }

    pub fn with_offset(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_day(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn local_day(&self, at: DateTime<Utc>) -> NaiveDate {
        (**self).local_day(at)
    }
}
