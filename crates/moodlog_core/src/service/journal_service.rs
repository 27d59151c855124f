//! Journal use-case service.

use crate::error::CoreResult;
use crate::model::clock::Clock;
use crate::model::factory::EntryFactory;
use crate::model::journal::{JournalEntry, JournalInput};
use crate::service::existing_ids;
use crate::store::{CollectionKind, Listing, StorageEngine, StoreBackend};
use log::info;

/// Service facade for journal entries.
pub struct JournalService<'s, B: StoreBackend, C: Clock> {
    store: &'s StorageEngine<B>,
    factory: EntryFactory<C>,
}

impl<'s, B: StoreBackend, C: Clock> JournalService<'s, B, C> {
    pub fn new(store: &'s StorageEngine<B>, clock: C) -> Self {
        Self {
            store,
            factory: EntryFactory::new(clock),
        }
    }

    /// Validates `input`, normalizes tags and appends the entry.
    pub fn write(&self, input: JournalInput) -> CoreResult<JournalEntry> {
        let taken = existing_ids::<JournalEntry, B>(self.store)?;
        let entry = self.factory.journal(input, |id| taken.contains(id))?;
        let stored = self.store.save(entry)?;
        info!(
            "event=journal_write module=service status=ok tag_count={}",
            stored.tags.len()
        );
        Ok(stored)
    }

    /// Whole collection, oldest first.
    pub fn list(&self) -> Listing<JournalEntry> {
        self.store.list()
    }

    pub fn get(&self, id: &str) -> CoreResult<JournalEntry> {
        Ok(self.store.get(id)?)
    }

    /// Irreversibly removes every journal entry.
    pub fn clear(&self) -> CoreResult<()> {
        self.store.clear(CollectionKind::Journal)?;
        Ok(())
    }
}
