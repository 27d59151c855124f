//! Core domain logic for MoodLog.
//! Local persistence, day-bucketed emotion aggregation and journal search.

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use analytics::aggregate::{DailyAverage, EmotionAggregator, EmotionStats};
pub use config::{check_chart_window, ConfigError, CoreConfig, MAX_CHART_WINDOW_DAYS};
pub use error::{CoreError, CoreResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::clock::{Clock, FixedClock, SystemClock};
pub use model::emotion::{EmotionEntry, EmotionInput, EmotionKind};
pub use model::factory::EntryFactory;
pub use model::journal::{JournalEntry, JournalInput};
pub use model::validation::ValidationError;
pub use search::journal_index::{JournalIndex, JournalPage, JournalPageQuery};
pub use service::emotion_service::EmotionService;
pub use service::journal_service::JournalService;
pub use store::{
    CollectionKind, CorruptedCollection, Listing, MemoryBackend, SqliteBackend, StorageEngine,
    StoreBackend, StoreError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
