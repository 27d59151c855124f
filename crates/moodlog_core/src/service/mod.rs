//! Use-case services.
//!
//! # Responsibility
//! - Chain entry creation and persistence into single calls.
//! - Keep callers decoupled from factory and storage details.

pub mod emotion_service;
pub mod journal_service;

use crate::store::{CollectionEntry, StorageEngine, StoreBackend};
use std::collections::HashSet;

/// Ids currently present in `T`'s collection.
///
/// Fails when the collection is unreadable, so a new entry never lands on
/// top of data that could not be checked for collisions.
fn existing_ids<T: CollectionEntry, B: StoreBackend>(
    store: &StorageEngine<B>,
) -> crate::CoreResult<HashSet<String>> {
    let listing = store.list::<T>();
    if let Some(condition) = listing.corrupted {
        return Err(condition.into());
    }
    Ok(listing
        .entries
        .iter()
        .map(|entry| entry.id().to_string())
        .collect())
}
