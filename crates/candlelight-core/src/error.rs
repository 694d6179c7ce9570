//! Core error types for candlelight-core.
//!
//! Burn transitions never fail: invalid calls are no-ops. The errors below
//! cover content selection and loading, persistence and configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::content::ContentKind;

/// Core error type for candlelight-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Content selection or loading errors
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Content-specific errors.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The picker was handed an empty pool. Callers must supply a fallback.
    #[error("cannot pick from an empty pool")]
    EmptyPool,

    /// A content collection could not be fetched
    #[error("Failed to load {kind} from {origin}: {message}")]
    LoadFailed {
        kind: ContentKind,
        origin: String,
        message: String,
    },

    /// A content collection was fetched but is not a valid item list
    #[error("Failed to parse {kind}: {source}")]
    Parse {
        kind: ContentKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the state database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),

    /// The store refused the operation (disabled, full, read-only)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
