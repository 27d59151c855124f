//! Entry factory: identity, timestamps and input validation.
//!
//! # Responsibility
//! - Validate raw caller fields against the entry invariants.
//! - Assign a collision-free id and the creation instant.
//!
//! # Invariants
//! - Never touches storage; persisting the result is the caller's step.
//! - An id accepted by `is_taken` as already used is never returned.

use crate::model::clock::Clock;
use crate::model::emotion::{EmotionEntry, EmotionInput, EmotionKind};
use crate::model::journal::{normalize_tags, JournalEntry, JournalInput};
use crate::model::validation::{check_intensity, ValidationError, ValidationResult};
use uuid::Uuid;

/// Builds validated entries from raw input.
#[derive(Debug, Clone)]
pub struct EntryFactory<C: Clock> {
    clock: C,
}

impl<C: Clock> EntryFactory<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Creates an emotion entry.
    ///
    /// `is_taken` reports ids already present in the target collection.
    ///
    /// # Errors
    /// - `MissingEmotion` / `UnknownEmotion` for a bad category.
    /// - `MissingIntensity` / `IntensityOutOfRange` for a bad intensity.
    pub fn emotion(
        &self,
        input: EmotionInput,
        is_taken: impl Fn(&str) -> bool,
    ) -> ValidationResult<EmotionEntry> {
        let emotion = input
            .emotion
            .as_deref()
            .ok_or(ValidationError::MissingEmotion)?
            .parse::<EmotionKind>()?;
        let intensity = check_intensity(input.intensity.ok_or(ValidationError::MissingIntensity)?)?;

        Ok(EmotionEntry {
            id: fresh_id(is_taken),
            emotion,
            intensity,
            notes: non_blank(input.notes),
            timestamp: self.clock.now(),
            user_id: non_blank(input.user_id),
        })
    }

    /// Creates a journal entry with normalized tags.
    ///
    /// Title, content, mood and user id are stored as given; only tags are
    /// rewritten.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyContent` when either is blank.
    pub fn journal(
        &self,
        input: JournalInput,
        is_taken: impl Fn(&str) -> bool,
    ) -> ValidationResult<JournalEntry> {
        if input.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if input.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        Ok(JournalEntry {
            id: fresh_id(is_taken),
            title: input.title,
            content: input.content,
            mood: non_blank(input.mood),
            tags: normalize_tags(&input.tags),
            created_at: self.clock.now(),
            user_id: non_blank(input.user_id),
        })
    }
}

fn fresh_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}

/// Drops all-whitespace text; anything else is kept byte-for-byte.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
