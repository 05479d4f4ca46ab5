//! Core error types for trainlog-core.
//!
//! Every condition in this library is local and recoverable: the caller
//! (presentation layer) decides user-facing messaging. Nothing here is
//! fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

use crate::schedule::CategoryKey;

/// Core error type for trainlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session state machine errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by session state machine transitions.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The requested day does not exist in the schedule catalog
    #[error("no day at index {index} (schedule has {len} days)")]
    InvalidDayIndex { index: usize, len: usize },

    /// A session is already active; starting would silently overwrite it
    #[error("a session is already active for day {day_index}")]
    SessionAlreadyActive { day_index: usize },

    /// The operation requires an active session and none exists
    #[error("no active session")]
    NoActiveSession,

    /// Input failed validation (empty exercise name, missing category, ...)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Entry index out of bounds for a category's entry list
    #[error("entry index {index} out of bounds for {category} (length: {len})")]
    IndexOutOfRange {
        category: CategoryKey,
        index: usize,
        len: usize,
    },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to write a record to disk
    #[error("Failed to write record '{key}' to {path}: {source}")]
    WriteFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a record
    #[error("Failed to encode record '{key}': {source}")]
    EncodeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory: {0}")]
    DataDir(String),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
