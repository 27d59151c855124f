//! Whole-collection read-modify-write engine over a `StoreBackend`.

use super::{
    BackendError, CollectionEntry, CollectionKind, CorruptedCollection, Listing, StoreBackend,
    StoreError, StoreResult,
};
use crate::model::validation::ValidationError;
use log::{error, info, warn};
use std::collections::HashSet;
use std::time::Instant;

/// Owns the durable collections and mediates every access to them.
pub struct StorageEngine<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> StorageEngine<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Appends `entry` and persists the whole collection.
    ///
    /// Returns the stored entry unchanged.
    ///
    /// # Errors
    /// - `Validation` when the entry breaks invariants or reuses an id.
    /// - `Corrupted` when the existing collection is unreadable; nothing is
    ///   written so the unreadable blob stays available for recovery.
    /// - `Unavailable` when the backend write fails; prior state is kept.
    pub fn save<T: CollectionEntry>(&self, entry: T) -> StoreResult<T> {
        let started_at = Instant::now();
        let kind = T::KIND;
        entry.validate()?;

        let mut entries = self.load::<T>().map_err(StoreError::Corrupted)?;
        if entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(ValidationError::DuplicateId(entry.id().to_string()).into());
        }
        entries.push(entry.clone());

        self.persist(kind, &entries)?;
        info!(
            "event=collection_save module=store status=ok kind={kind} count={} duration_ms={}",
            entries.len(),
            started_at.elapsed().as_millis()
        );
        Ok(entry)
    }

    /// Returns the collection oldest first.
    ///
    /// Never fails: an unreadable collection yields an empty listing with
    /// `corrupted` set.
    pub fn list<T: CollectionEntry>(&self) -> Listing<T> {
        match self.load::<T>() {
            Ok(entries) => Listing::complete(entries),
            Err(condition) => {
                warn!(
                    "event=collection_read module=store status=degraded kind={} reason={}",
                    condition.kind, condition.reason
                );
                Listing::degraded(condition)
            }
        }
    }

    /// Looks one entry up by id.
    pub fn get<T: CollectionEntry>(&self, id: &str) -> StoreResult<T> {
        let entries = self.load::<T>().map_err(StoreError::Corrupted)?;
        entries
            .into_iter()
            .find(|entry| entry.id() == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    /// Irreversibly drops every entry of `kind`.
    pub fn clear(&self, kind: CollectionKind) -> StoreResult<()> {
        self.backend.remove(kind.key()).map_err(|source| {
            error!(
                "event=collection_clear module=store status=error kind={kind} error={source}"
            );
            StoreError::Unavailable { kind, source }
        })?;
        info!("event=collection_clear module=store status=ok kind={kind}");
        Ok(())
    }

    fn load<T: CollectionEntry>(&self) -> Result<Vec<T>, CorruptedCollection> {
        let kind = T::KIND;
        let corrupted = |reason: String| CorruptedCollection { kind, reason };

        let Some(payload) = self
            .backend
            .read(kind.key())
            .map_err(|err| corrupted(err.to_string()))?
        else {
            return Ok(Vec::new());
        };

        let entries: Vec<T> =
            serde_json::from_str(&payload).map_err(|err| corrupted(err.to_string()))?;
        let mut seen = HashSet::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            entry
                .validate()
                .map_err(|err| corrupted(format!("entry #{position}: {err}")))?;
            if !seen.insert(entry.id()) {
                return Err(corrupted(format!(
                    "entry #{position}: {}",
                    ValidationError::DuplicateId(entry.id().to_string())
                )));
            }
        }
        Ok(entries)
    }

    fn persist<T: CollectionEntry>(&self, kind: CollectionKind, entries: &[T]) -> StoreResult<()> {
        let unavailable = |source: BackendError| {
            error!("event=collection_save module=store status=error kind={kind} error={source}");
            StoreError::Unavailable { kind, source }
        };

        let payload =
            serde_json::to_string(entries).map_err(|err| unavailable(BackendError::Encode(err)))?;
        self.backend
            .write(kind.key(), &payload)
            .map_err(unavailable)
    }
}
