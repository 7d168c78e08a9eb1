//! Core error types for rotation-core.
//!
//! Every fallible operation in the library reports one of the enums below,
//! all built with thiserror and gathered under [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rotation-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timeline precondition violations
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// Rejected import payloads
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Clipboard or prompt collaborator failures
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Catalog loading errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Drag identifiers that resolve to nothing
    #[error("Drag error: {0}")]
    Drag(#[from] DragError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Timeline mutation errors.
///
/// These indicate a caller passed an index the timeline cannot honour.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// Index outside the valid range for the operation
    #[error("Index {index} out of range for timeline (length: {len})")]
    OutOfRange { index: usize, len: usize },

    /// Two blocks in a loaded timeline share one id
    #[error("Duplicate block id: {0}")]
    DuplicateId(String),
}

/// Import errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Payload is not a JSON array of `{tick, ability}` objects
    #[error("Invalid timeline JSON format: {0}")]
    InvalidFormat(String),
}

/// Clipboard/prompt collaborator errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The clipboard could not be reached or refused the operation
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read a catalog file
    #[error("Failed to load catalog from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Catalog TOML did not parse
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// Section or ability with an empty name
    #[error("Empty name in catalog section '{section}'")]
    EmptyName { section: String },

    /// The same ability appears twice
    #[error("Duplicate catalog entry: {0}")]
    DuplicateEntry(String),
}

/// Drag boundary errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    /// A dragged item identifier that names no palette item or block id
    #[error("Unknown drag item: {0}")]
    UnknownItem(String),

    /// A drop target identifier that names no slot or the trash bin
    #[error("Unknown drop target: {0}")]
    UnknownTarget(String),
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

    /// Unknown dotted key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Configuration directory unavailable: {0}")]
    NoDataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
