//! Day-bucketed emotion intensity aggregation.
//!
//! # Responsibility
//! - Produce the per-day, per-category average series used for charting.
//! - Summarize counts and overall averages over the same window.
//!
//! # Invariants
//! - The series holds exactly one record per day of the window, ascending.
//! - A category with no samples on a day is absent, never zero.
//! - Day boundaries come from `Clock::local_day`.

use crate::model::clock::Clock;
use crate::model::emotion::{EmotionEntry, EmotionKind};
use crate::model::validation::{check_window, ValidationResult};
use crate::store::{CorruptedCollection, Listing, StorageEngine, StoreBackend};
use chrono::{Days, NaiveDate};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// One chart point: a day and the mean intensity of each category seen that day.
///
/// Serializes flat, e.g. `{"date":"2026-10-17","happy":6.0}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub averages: BTreeMap<EmotionKind, f64>,
}

impl DailyAverage {
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

/// Window summary: counts, overall means and the daily series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionStats {
    pub counts: BTreeMap<EmotionKind, usize>,
    pub average_intensity: BTreeMap<EmotionKind, f64>,
    pub daily: Vec<DailyAverage>,
    /// Set when the collection was unreadable; all figures are then empty.
    #[serde(skip)]
    pub corrupted: Option<CorruptedCollection>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: u64,
    count: usize,
}

impl Tally {
    fn add(&mut self, intensity: u8) {
        self.sum += u64::from(intensity);
        self.count += 1;
    }

    fn mean(self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

/// Stateless aggregator reading through the store on every call.
pub struct EmotionAggregator<'s, B: StoreBackend, C: Clock> {
    store: &'s StorageEngine<B>,
    clock: C,
}

impl<'s, B: StoreBackend, C: Clock> EmotionAggregator<'s, B, C> {
    pub fn new(store: &'s StorageEngine<B>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Average intensity per day and category over the trailing window.
    ///
    /// The window covers `window_days` local calendar days ending today,
    /// inclusive. An unreadable collection yields empty day records and
    /// carries the corruption signal in the listing.
    ///
    /// # Errors
    /// - `NonPositiveWindow` when `window_days <= 0`.
    pub fn aggregate(&self, window_days: i64) -> ValidationResult<Listing<DailyAverage>> {
        let (start, end) = self.window(window_days)?;
        let listing = self.store.list::<EmotionEntry>();
        let corrupted = listing.corrupted;
        let buckets = self.bucket(&listing.entries, start, end);

        Ok(Listing {
            entries: daily_series(&buckets, start, end),
            corrupted,
        })
    }

    /// Per-category counts and means over the window, plus the daily series.
    pub fn stats(&self, window_days: i64) -> ValidationResult<EmotionStats> {
        let (start, end) = self.window(window_days)?;
        let listing = self.store.list::<EmotionEntry>();
        let corrupted = listing.corrupted;
        let buckets = self.bucket(&listing.entries, start, end);

        let mut totals: BTreeMap<EmotionKind, Tally> = BTreeMap::new();
        for per_kind in buckets.values() {
            for (kind, tally) in per_kind {
                let total = totals.entry(*kind).or_default();
                total.sum += tally.sum;
                total.count += tally.count;
            }
        }

        Ok(EmotionStats {
            counts: totals
                .iter()
                .map(|(kind, tally)| (*kind, tally.count))
                .collect(),
            average_intensity: totals
                .iter()
                .map(|(kind, tally)| (*kind, tally.mean()))
                .collect(),
            daily: daily_series(&buckets, start, end),
            corrupted,
        })
    }

    fn window(&self, window_days: i64) -> ValidationResult<(NaiveDate, NaiveDate)> {
        let span = check_window(window_days)?;
        let end = self.clock.today();
        let start = end
            .checked_sub_days(Days::new(span - 1))
            .unwrap_or(NaiveDate::MIN);
        debug!("event=emotion_aggregate module=analytics status=start start={start} end={end}");
        Ok((start, end))
    }

    fn bucket(
        &self,
        entries: &[EmotionEntry],
        start: NaiveDate,
        end: NaiveDate,
    ) -> BTreeMap<NaiveDate, BTreeMap<EmotionKind, Tally>> {
        let mut buckets: BTreeMap<NaiveDate, BTreeMap<EmotionKind, Tally>> = BTreeMap::new();
        for entry in entries {
            let day = self.clock.local_day(entry.timestamp);
            if day < start || day > end {
                continue;
            }
            buckets
                .entry(day)
                .or_default()
                .entry(entry.emotion)
                .or_default()
                .add(entry.intensity);
        }
        buckets
    }
}

fn daily_series(
    buckets: &BTreeMap<NaiveDate, BTreeMap<EmotionKind, Tally>>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailyAverage> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| DailyAverage {
            date,
            averages: buckets
                .get(&date)
                .map(|per_kind| {
                    per_kind
                        .iter()
                        .map(|(kind, tally)| (*kind, tally.mean()))
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}
