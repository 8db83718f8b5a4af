use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Meter Monitor.
#[derive(Error, Debug)]
pub enum MeterError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A malformed record or I/O fault inside the CSV layer.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A date string did not match the expected `DD/MM/YYYY` format.
    #[error("Invalid date format: {0}")]
    DateParse(String),

    /// A meter reading value was not numeric after cleaning.
    #[error("Invalid reading value: {0}")]
    ReadingParse(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the meter crates.
pub type Result<T> = std::result::Result<T, MeterError>;
