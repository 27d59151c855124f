//! Durable collection store.
//!
//! # Responsibility
//! - Persist the `emotions` and `journal` collections as whole JSON blobs.
//! - Degrade unreadable collections to empty reads plus a surfaced condition.
//!
//! # Invariants
//! - Every save or clear rewrites one whole collection in one backend write.
//! - A failed write leaves the previously committed collection untouched.
//! - Collections are append-only; stored entries are never edited in place.
//! - Concurrent writers in separate processes are not coordinated; the last
//!   whole-collection write wins.

use crate::db::DbError;
use crate::model::emotion::EmotionEntry;
use crate::model::journal::JournalEntry;
use crate::model::validation::{ValidationError, ValidationResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod engine;
mod memory;
mod sqlite;

pub use engine::StorageEngine;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

pub type StoreResult<T> = Result<T, StoreError>;
pub type BackendResult<T> = Result<T, BackendError>;

/// Named collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Emotions,
    Journal,
}

impl CollectionKind {
    /// Fixed storage key of the collection record.
    pub fn key(self) -> &'static str {
        match self {
            Self::Emotions => "emotions",
            Self::Journal => "journal",
        }
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Entry types that live in one named collection.
pub trait CollectionEntry: Serialize + DeserializeOwned + Clone {
    const KIND: CollectionKind;

    fn id(&self) -> &str;

    /// Invariant check applied on write and on read-back.
    fn validate(&self) -> ValidationResult<()>;
}

impl CollectionEntry for EmotionEntry {
    const KIND: CollectionKind = CollectionKind::Emotions;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> ValidationResult<()> {
        EmotionEntry::validate(self)
    }
}

impl CollectionEntry for JournalEntry {
    const KIND: CollectionKind = CollectionKind::Journal;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> ValidationResult<()> {
        JournalEntry::validate(self)
    }
}

/// Raw blob storage that the engine writes whole collections into.
pub trait StoreBackend {
    /// Returns the stored blob, or `None` when the key was never written.
    fn read(&self, key: &str) -> BackendResult<Option<String>>;
    /// Replaces the blob for `key` in a single atomic write.
    fn write(&self, key: &str, payload: &str) -> BackendResult<()>;
    /// Drops the blob for `key`; a missing key is not an error.
    fn remove(&self, key: &str) -> BackendResult<()>;
}

impl<B: StoreBackend + ?Sized> StoreBackend for Box<B> {
    fn read(&self, key: &str) -> BackendResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, payload: &str) -> BackendResult<()> {
        (**self).write(key, payload)
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        (**self).remove(key)
    }
}

/// Transport-level backend failure.
#[derive(Debug)]
pub enum BackendError {
    Db(DbError),
    Encode(serde_json::Error),
    /// Backend refused the operation (e.g. injected fault, read-only store).
    Rejected(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Rejected(reason) => write!(f, "backend rejected operation: {reason}"),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<DbError> for BackendError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BackendError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Non-fatal signal that a collection could not be read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptedCollection {
    pub kind: CollectionKind,
    pub reason: String,
}

impl Display for CorruptedCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "collection `{}` is unreadable: {}", self.kind, self.reason)
    }
}

/// Result of a degradable read: entries plus an optional corruption signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub entries: Vec<T>,
    /// Set when the stored collection was unreadable; `entries` is then empty.
    pub corrupted: Option<CorruptedCollection>,
}

impl<T> Listing<T> {
    pub fn complete(entries: Vec<T>) -> Self {
        Self {
            entries,
            corrupted: None,
        }
    }

    pub fn degraded(condition: CorruptedCollection) -> Self {
        Self {
            entries: Vec::new(),
            corrupted: Some(condition),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.corrupted.is_some()
    }

    /// Transforms entries while carrying the corruption signal through.
    pub fn map<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Listing<U> {
        Listing {
            entries: f(self.entries),
            corrupted: self.corrupted,
        }
    }
}

/// Store error for save/get/clear paths.
#[derive(Debug)]
pub enum StoreError {
    /// Entry failed invariants before reaching the backend.
    Validation(ValidationError),
    /// Write could not be committed; prior state is unchanged.
    Unavailable {
        kind: CollectionKind,
        source: BackendError,
    },
    /// Existing collection is unreadable.
    Corrupted(CorruptedCollection),
    NotFound {
        kind: CollectionKind,
        id: String,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unavailable { kind, source } => {
                write!(f, "storage unavailable for `{kind}`: {source}")
            }
            Self::Corrupted(condition) => write!(f, "{condition}"),
            Self::NotFound { kind, id } => write!(f, "{kind} entry not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Unavailable { source, .. } => Some(source),
            Self::Corrupted(_) | Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
