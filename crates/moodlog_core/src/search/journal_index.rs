//! Substring index over the journal collection.
//!
//! # Invariants
//! - A blank query matches every entry.
//! - Title, content and each tag are tested independently; one hit qualifies
//!   the entry.
//! - No scoring, stemming or tokenization is applied.

use crate::model::journal::JournalEntry;
use crate::store::{CorruptedCollection, Listing, StorageEngine, StoreBackend};
use log::debug;

const PAGE_SIZE_DEFAULT: u32 = 10;
const PAGE_SIZE_MAX: u32 = 50;

/// Filter and paging options for [`JournalIndex::list_page`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalPageQuery {
    /// Exact tag match, case-insensitive.
    pub tag: Option<String>,
    /// Exact mood match, case-insensitive.
    pub mood: Option<String>,
    /// 1-based page number; `0` is treated as `1`.
    pub page: u32,
    /// Defaults to 10 and clamps to 50.
    pub page_size: Option<u32>,
}

/// One page of journal entries.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalPage {
    pub items: Vec<JournalEntry>,
    /// Matching entries across all pages.
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub corrupted: Option<CorruptedCollection>,
}

/// Stateless search view over the journal collection.
pub struct JournalIndex<'s, B: StoreBackend> {
    store: &'s StorageEngine<B>,
}

impl<'s, B: StoreBackend> JournalIndex<'s, B> {
    pub fn new(store: &'s StorageEngine<B>) -> Self {
        Self { store }
    }

    /// Entries whose title, content or any tag contains `query`, ignoring case.
    ///
    /// A blank query returns the whole collection. Read corruption yields an
    /// empty listing with the condition set.
    pub fn search(&self, query: &str) -> Listing<JournalEntry> {
        let listing = self.store.list::<JournalEntry>();
        let needle = (!query.trim().is_empty()).then(|| query.to_lowercase());

        let result = listing.map(|entries| {
            let matched = match needle.as_deref() {
                Some(needle) => entries
                    .into_iter()
                    .filter(|entry| matches_entry(entry, needle))
                    .collect(),
                None => entries,
            };
            newest_first(matched)
        });
        debug!(
            "event=journal_search module=search status=ok blank_query={} hits={}",
            needle.is_none(),
            result.entries.len()
        );
        result
    }

    /// Filtered, paged listing, newest first.
    pub fn list_page(&self, query: &JournalPageQuery) -> JournalPage {
        let page_size = normalize_page_size(query.page_size);
        let page = query.page.max(1);
        let listing = self.store.list::<JournalEntry>();

        let tag = query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());
        let mood = query
            .mood
            .as_deref()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty());

        let matched = newest_first(
            listing
                .entries
                .into_iter()
                .filter(|entry| tag.map_or(true, |tag| entry.has_tag(tag)))
                .filter(|entry| {
                    mood.as_deref().map_or(true, |mood| {
                        entry
                            .mood
                            .as_deref()
                            .is_some_and(|value| value.trim().to_lowercase() == mood)
                    })
                })
                .collect(),
        );

        let total = matched.len();
        let skip = (page as usize - 1).saturating_mul(page_size as usize);
        let items = matched
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect();

        JournalPage {
            items,
            total,
            page,
            page_size,
            corrupted: listing.corrupted,
        }
    }
}

/// Normalizes a requested page size according to the listing contract.
pub fn normalize_page_size(page_size: Option<u32>) -> u32 {
    match page_size {
        Some(0) | None => PAGE_SIZE_DEFAULT,
        Some(value) => value.min(PAGE_SIZE_MAX),
    }
}

fn matches_entry(entry: &JournalEntry, needle: &str) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry.content.to_lowercase().contains(needle)
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

fn newest_first(mut entries: Vec<JournalEntry>) -> Vec<JournalEntry> {
    // Reverse first so the stable sort leaves later inserts ahead on ties.
    entries.reverse();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}
