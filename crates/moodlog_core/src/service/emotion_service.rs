//! Emotion use-case service.
//!
//! # Invariants
//! - `record` never persists input that failed factory validation.
//! - Filtered listings are newest first and never cache.

use crate::error::CoreResult;
use crate::model::clock::Clock;
use crate::model::emotion::{EmotionEntry, EmotionInput, EmotionKind};
use crate::model::factory::EntryFactory;
use crate::service::existing_ids;
use crate::store::{CollectionKind, Listing, StorageEngine, StoreBackend};
use chrono::{DateTime, Utc};
use log::info;

/// Service facade for emotion samples.
pub struct EmotionService<'s, B: StoreBackend, C: Clock> {
    store: &'s StorageEngine<B>,
    factory: EntryFactory<C>,
}

impl<'s, B: StoreBackend, C: Clock> EmotionService<'s, B, C> {
    pub fn new(store: &'s StorageEngine<B>, clock: C) -> Self {
        Self {
            store,
            factory: EntryFactory::new(clock),
        }
    }

    /// Validates `input`, stamps it and appends it to the collection.
    pub fn record(&self, input: EmotionInput) -> CoreResult<EmotionEntry> {
        let taken = existing_ids::<EmotionEntry, B>(self.store)?;
        let entry = self.factory.emotion(input, |id| taken.contains(id))?;
        let stored = self.store.save(entry)?;
        info!(
            "event=emotion_record module=service status=ok emotion={} intensity={}",
            stored.emotion, stored.intensity
        );
        Ok(stored)
    }

    /// Whole collection, oldest first.
    pub fn list(&self) -> Listing<EmotionEntry> {
        self.store.list()
    }

    pub fn get(&self, id: &str) -> CoreResult<EmotionEntry> {
        Ok(self.store.get(id)?)
    }

    /// Samples of one category, newest first.
    pub fn by_type(&self, kind: EmotionKind) -> Listing<EmotionEntry> {
        self.filtered(|entry| entry.emotion == kind)
    }

    /// Samples with `start <= timestamp <= end`, newest first.
    pub fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Listing<EmotionEntry> {
        self.filtered(|entry| entry.timestamp >= start && entry.timestamp <= end)
    }

    /// Irreversibly removes every emotion sample.
    pub fn clear(&self) -> CoreResult<()> {
        self.store.clear(CollectionKind::Emotions)?;
        Ok(())
    }

    fn filtered(&self, keep: impl Fn(&EmotionEntry) -> bool) -> Listing<EmotionEntry> {
        self.store.list::<EmotionEntry>().map(|entries| {
            let mut kept: Vec<_> = entries.into_iter().filter(|e| keep(e)).collect();
            kept.reverse();
            kept.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            kept
        })
    }
}
