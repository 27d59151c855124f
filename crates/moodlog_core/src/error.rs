//! Caller-facing error taxonomy.
//!
//! Every failure is local and recoverable: the caller can re-prompt, retry a
//! write, or clear an unreadable collection.

use crate::model::validation::ValidationError;
use crate::store::{BackendError, CollectionKind, CorruptedCollection, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug)]
pub enum CoreError {
    /// Malformed input; nothing reached the store.
    Validation(ValidationError),
    /// A write could not be committed; prior state is unchanged.
    StorageUnavailable {
        kind: CollectionKind,
        source: BackendError,
    },
    /// Stored data could not be decoded.
    StorageCorrupted(CorruptedCollection),
    /// Lookup by id found nothing.
    NotFound { kind: CollectionKind, id: String },
}

impl CoreError {
    /// Stable machine-readable code for logs and UI mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::StorageCorrupted(_) => "storage_corrupted",
            Self::NotFound { .. } => "not_found",
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StorageUnavailable { kind, source } => {
                write!(f, "storage unavailable for `{kind}`: {source}")
            }
            Self::StorageCorrupted(condition) => write!(f, "{condition}"),
            Self::NotFound { kind, id } => write!(f, "{kind} entry not found: {id}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StorageUnavailable { source, .. } => Some(source),
            Self::StorageCorrupted(_) | Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for CoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CoreError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            StoreError::Unavailable { kind, source } => Self::StorageUnavailable { kind, source },
            StoreError::Corrupted(condition) => Self::StorageCorrupted(condition),
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
        }
    }
}

impl From<CorruptedCollection> for CoreError {
    fn from(value: CorruptedCollection) -> Self {
        Self::StorageCorrupted(value)
    }
}
