//! CLI driver for `moodlog_core`.
//!
//! # Responsibility
//! - Exercise the core from a terminal against the configured SQLite store.
//! - Print results as JSON on stdout; failures go to stderr with exit code 1.

use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use moodlog_core::{
    check_chart_window, init_from_config, CollectionKind, CoreConfig, CoreError,
    CorruptedCollection, EmotionAggregator, EmotionInput, EmotionService, JournalIndex,
    JournalInput, JournalPageQuery, JournalService, SqliteBackend, StorageEngine, SystemClock,
    ValidationError,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

/// Local mood and journal log
#[derive(Parser, Debug)]
#[command(name = "moodlog")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Check core linkage and print its version
    Ping,
    /// Record one emotion sample
    Record {
        /// happy|sad|angry|anxious|calm|excited
        emotion: String,
        /// Intensity from 1 to 10
        #[arg(allow_hyphen_values = true)]
        intensity: i64,
        /// Free-form notes
        notes: Option<String>,
    },
    /// Write one journal entry
    Write {
        title: String,
        content: String,
        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(short, long)]
        mood: Option<String>,
    },
    /// Daily average intensity per emotion, oldest day first
    Chart {
        /// Window length in days (defaults to MOODLOG_CHART_WINDOW_DAYS)
        #[arg(value_parser = parse_window)]
        days: Option<i64>,
    },
    /// Counts and mean intensity per emotion over the window
    Stats {
        #[arg(value_parser = parse_window)]
        days: Option<i64>,
    },
    /// Case-insensitive substring search over journal entries
    Search {
        /// Blank or omitted returns every entry
        query: Option<String>,
    },
    /// List a collection; journal listings are paged
    List {
        collection: CollectionArg,
        #[arg(short, long)]
        page: Option<u32>,
        /// Journal only: exact tag filter
        #[arg(long)]
        tag: Option<String>,
        /// Journal only: exact mood filter
        #[arg(long)]
        mood: Option<String>,
    },
    /// Irreversibly remove every entry of a collection
    Clear { collection: CollectionArg },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CollectionArg {
    Emotions,
    Journal,
}

impl From<CollectionArg> for CollectionKind {
    fn from(value: CollectionArg) -> Self {
        match value {
            CollectionArg::Emotions => CollectionKind::Emotions,
            CollectionArg::Journal => CollectionKind::Journal,
        }
    }
}

fn parse_window(raw: &str) -> Result<i64, String> {
    let days = raw
        .parse::<i64>()
        .map_err(|_| format!("days must be an integer, got `{raw}`"))?;
    check_chart_window(days)
}

#[derive(Debug)]
enum CliError {
    Setup(String),
    Output(serde_json::Error),
    Core(CoreError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup(message) => write!(f, "{message}"),
            Self::Output(err) => write!(f, "failed to encode output: {err}"),
            Self::Core(err) => write!(f, "{}: {err}", err.code()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(value: CoreError) -> Self {
        Self::Core(value)
    }
}

impl From<ValidationError> for CliError {
    fn from(value: ValidationError) -> Self {
        Self::Core(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

type Store = StorageEngine<SqliteBackend>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let CliError::Core(core) = &err {
                error!(
                    "event=cli_command module=cli status=error code={}",
                    core.code()
                );
            }
            eprintln!("moodlog: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<Value, CliError> {
    // Ping must work without a writable store.
    if command == Command::Ping {
        return Ok(ping());
    }

    let config = CoreConfig::from_env().map_err(|err| CliError::Setup(err.to_string()))?;
    init_from_config(&config).map_err(|err| CliError::Setup(err.to_string()))?;
    let backend = SqliteBackend::open(&config.data_path)
        .map_err(|err| CliError::Setup(err.to_string()))?;
    let store = StorageEngine::new(backend);
    execute(command, &config, &store)
}

fn ping() -> Value {
    json!({
        "ping": moodlog_core::ping(),
        "version": moodlog_core::core_version(),
    })
}

fn execute(command: Command, config: &CoreConfig, store: &Store) -> Result<Value, CliError> {
    match command {
        Command::Ping => Ok(ping()),
        Command::Record {
            emotion,
            intensity,
            notes,
        } => {
            let mut input = EmotionInput::new(emotion, intensity);
            input.notes = notes;
            let stored = EmotionService::new(store, SystemClock).record(input)?;
            to_value(&stored)
        }
        Command::Write {
            title,
            content,
            tags,
            mood,
        } => {
            let mut input = JournalInput::new(title, content).with_tags(tags);
            input.mood = mood;
            let stored = JournalService::new(store, SystemClock).write(input)?;
            to_value(&stored)
        }
        Command::Chart { days } => {
            let days = days.unwrap_or(config.chart_window_days);
            let series = EmotionAggregator::new(store, SystemClock).aggregate(days)?;
            warn_corrupted(series.corrupted.as_ref());
            to_value(&series.entries)
        }
        Command::Stats { days } => {
            let days = days.unwrap_or(config.chart_window_days);
            let stats = EmotionAggregator::new(store, SystemClock).stats(days)?;
            warn_corrupted(stats.corrupted.as_ref());
            to_value(&stats)
        }
        Command::Search { query } => {
            let hits = JournalIndex::new(store).search(query.as_deref().unwrap_or(""));
            warn_corrupted(hits.corrupted.as_ref());
            to_value(&hits.entries)
        }
        Command::List {
            collection,
            page,
            tag,
            mood,
        } => list(store, collection.into(), page, tag, mood),
        Command::Clear { collection } => {
            let kind = CollectionKind::from(collection);
            store.clear(kind).map_err(CoreError::from)?;
            Ok(json!({ "cleared": kind.key() }))
        }
    }
}

fn list(
    store: &Store,
    kind: CollectionKind,
    page: Option<u32>,
    tag: Option<String>,
    mood: Option<String>,
) -> Result<Value, CliError> {
    match kind {
        CollectionKind::Emotions => {
            let listing = EmotionService::new(store, SystemClock).list();
            warn_corrupted(listing.corrupted.as_ref());
            to_value(&listing.entries)
        }
        CollectionKind::Journal => {
            let result = JournalIndex::new(store).list_page(&JournalPageQuery {
                tag,
                mood,
                page: page.unwrap_or(1),
                page_size: None,
            });
            warn_corrupted(result.corrupted.as_ref());
            let items = to_value(&result.items)?;
            Ok(json!({
                "items": items,
                "total": result.total,
                "page": result.page,
                "page_size": result.page_size,
            }))
        }
    }
}

fn warn_corrupted(condition: Option<&CorruptedCollection>) {
    if let Some(condition) = condition {
        eprintln!("moodlog: warning: {condition}; showing empty results");
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, CliError> {
    Ok(serde_json::to_value(value)?)
}
