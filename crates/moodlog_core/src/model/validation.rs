//! Validation errors raised at the entry boundary.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest accepted emotion intensity.
pub const MIN_INTENSITY: i64 = 1;
/// Largest accepted emotion intensity.
pub const MAX_INTENSITY: i64 = 10;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed input detected before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Emotion category was not supplied.
    MissingEmotion,
    /// Emotion category is outside the closed set.
    UnknownEmotion(String),
    /// Intensity was not supplied.
    MissingIntensity,
    /// Intensity is outside `[MIN_INTENSITY, MAX_INTENSITY]`.
    IntensityOutOfRange(i64),
    EmptyTitle,
    EmptyContent,
    /// Aggregation window must be at least one day.
    NonPositiveWindow(i64),
    /// Entry id already exists in the target collection.
    DuplicateId(String),
    EmptyId,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEmotion => write!(f, "emotion is required"),
            Self::UnknownEmotion(value) => write!(
                f,
                "unknown emotion `{value}`; expected happy|sad|angry|anxious|calm|excited"
            ),
            Self::MissingIntensity => write!(f, "intensity is required"),
            Self::IntensityOutOfRange(value) => write!(
                f,
                "intensity {value} is out of range [{MIN_INTENSITY}, {MAX_INTENSITY}]"
            ),
            Self::EmptyTitle => write!(f, "journal title cannot be empty"),
            Self::EmptyContent => write!(f, "journal content cannot be empty"),
            Self::NonPositiveWindow(days) => {
                write!(f, "window must be at least 1 day, got {days}")
            }
            Self::DuplicateId(id) => write!(f, "entry id already exists: {id}"),
            Self::EmptyId => write!(f, "entry id cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Checks the intensity range shared by creation and read-back paths.
pub fn check_intensity(value: i64) -> ValidationResult<u8> {
    if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&value) {
        return Err(ValidationError::IntensityOutOfRange(value));
    }
    // Range check above keeps the cast lossless.
    Ok(value as u8)
}

/// Checks an aggregation window length in days.
///
/// Any positive length is accepted; windows reaching past the earliest
/// representable date are cut off there by the aggregator.
pub fn check_window(window_days: i64) -> ValidationResult<u64> {
    if window_days <= 0 {
        return Err(ValidationError::NonPositiveWindow(window_days));
    }
    Ok(window_days.unsigned_abs())
}
