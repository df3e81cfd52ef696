//! Error types for roomcheck-engine operations.
//!
//! Per-record parse failures are not errors: an unparseable slot or time token
//! surfaces as `None` and the record is dropped from matching. Only failures of
//! the query itself ([`QueryError`]) or of loading data ([`RoomcheckError`])
//! reach the caller.

use std::path::PathBuf;

use thiserror::Error;

/// The query's own input is unusable; no partial report is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid time input: {0}")]
    InvalidTime(String),

    #[error("Invalid day input: day must not be empty")]
    EmptyDay,
}

/// Errors raised while loading timetables or configuration.
#[derive(Error, Debug)]
pub enum RoomcheckError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    /// The timetable has no header row at all.
    #[error("Timetable source {0} is empty")]
    EmptySource(String),

    #[error("Timetable source {source_name} has no column for {column}")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid configuration value for {field}: {value}")]
    ConfigValue { field: &'static str, value: String },

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Convenience alias used throughout roomcheck-engine.
pub type Result<T> = std::result::Result<T, RoomcheckError>;
