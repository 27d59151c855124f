//! Emotion sample model.
//!
//! # Invariants
//! - `emotion` is always one of the six closed categories.
//! - `intensity` is always within `[1, 10]`.
//! - `timestamp` is assigned once at creation and never changes.

use crate::model::validation::{check_intensity, ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Closed set of trackable emotion categories.
///
/// Declaration order is the stable order used for chart keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionKind {
    Happy,
    Sad,
    Angry,
    Anxious,
    Calm,
    Excited,
}

impl EmotionKind {
    pub const ALL: [EmotionKind; 6] = [
        EmotionKind::Happy,
        EmotionKind::Sad,
        EmotionKind::Angry,
        EmotionKind::Anxious,
        EmotionKind::Calm,
        EmotionKind::Excited,
    ];

    /// Wire/storage label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Anxious => "anxious",
            Self::Calm => "calm",
            Self::Excited => "excited",
        }
    }
}

impl Display for EmotionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionKind {
    type Err = ValidationError;

    /// Parses a label case-insensitively, ignoring surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::MissingEmotion);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownEmotion(value.trim().to_string()))
    }
}

/// One stored emotion sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub id: String,
    pub emotion: EmotionKind,
    pub intensity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl EmotionEntry {
    /// Re-checks invariants on an entry that did not come from the factory.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        check_intensity(i64::from(self.intensity))?;
        Ok(())
    }
}

/// Raw, unvalidated emotion fields as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmotionInput {
    pub emotion: Option<String>,
    pub intensity: Option<i64>,
    pub notes: Option<String>,
    pub user_id: Option<String>,
}

impl EmotionInput {
    /// Shorthand for the two required fields.
    pub fn new(emotion: impl Into<String>, intensity: i64) -> Self {
        Self {
            emotion: Some(emotion.into()),
            intensity: Some(intensity),
            ..Self::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}
