//! Runtime configuration resolved from environment variables.
//!
//! # Environment
//! - `MOODLOG_DATA_PATH`: SQLite store file (default `<temp>/moodlog.sqlite3`).
//! - `MOODLOG_LOG_LEVEL`: `trace|debug|info|warn|error` (default by build mode).
//! - `MOODLOG_LOG_DIR`: absolute directory for rolling logs; unset disables
//!   file logging.
//! - `MOODLOG_CHART_WINDOW_DAYS`: default aggregation window (default 30).
//!
//! # Invariants
//! - Blank values are treated exactly like unset values.
//! - Invalid values are rejected, never silently replaced by defaults.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATA_PATH_VAR: &str = "MOODLOG_DATA_PATH";
pub const LOG_LEVEL_VAR: &str = "MOODLOG_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "MOODLOG_LOG_DIR";
pub const CHART_WINDOW_VAR: &str = "MOODLOG_CHART_WINDOW_DAYS";

const DATA_FILE_NAME: &str = "moodlog.sqlite3";
const DEFAULT_CHART_WINDOW_DAYS: i64 = 30;
/// Upper bound for configured chart windows; keeps chart output bounded.
pub const MAX_CHART_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { var: &'static str, value: String },
    InvalidWindow { var: &'static str, value: i64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { var, value } => {
                write!(f, "{var} must be an integer, got `{value}`")
            }
            Self::InvalidWindow { var, value } => {
                write!(f, "{var} must be a positive day count, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_path: PathBuf,
    pub log_level: String,
    /// `None` keeps file logging off.
    pub log_dir: Option<String>,
    pub chart_window_days: i64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_path: std::env::temp_dir().join(DATA_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            chart_window_days: DEFAULT_CHART_WINDOW_DAYS,
        }
    }
}

impl CoreConfig {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let chart_window_days = match read(CHART_WINDOW_VAR) {
            Some(raw) => {
                let value = raw.parse::<i64>().map_err(|_| ConfigError::InvalidNumber {
                    var: CHART_WINDOW_VAR,
                    value: raw.clone(),
                })?;
                check_chart_window(value).map_err(|_| ConfigError::InvalidWindow {
                    var: CHART_WINDOW_VAR,
                    value,
                })?
            }
            None => defaults.chart_window_days,
        };

        Ok(Self {
            data_path: read(DATA_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            log_level: read(LOG_LEVEL_VAR).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_VAR),
            chart_window_days,
        })
    }
}

/// Validates a chart window against `MAX_CHART_WINDOW_DAYS`.
///
/// The aggregator accepts any positive window; this bound applies to
/// configured and command-line defaults only.
pub fn check_chart_window(days: i64) -> Result<i64, String> {
    if (1..=MAX_CHART_WINDOW_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(format!(
            "window must be between 1 and {MAX_CHART_WINDOW_DAYS} days, got {days}"
        ))
    }
}
