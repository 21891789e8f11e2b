//! Error types for quotebook-core

use thiserror::Error;

/// Result type alias using quotebook-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quotebook-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Persisted mirror is corrupt or unreadable
    #[error("Persisted data could not be read: {0}")]
    PersistenceRead(String),

    /// Required input is missing or blank
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Remote source could not be fetched or decoded
    #[error("Remote fetch failed: {0}")]
    RemoteFetch(String),

    /// Imported file is not a JSON array of quotes
    #[error("Import failed: {0}")]
    ImportParse(String),

    /// Quote not found
    #[error("Quote not found: {0}")]
    NotFound(String),

    /// Persistence provider failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
