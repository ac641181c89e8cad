//! Error types for option validation

use thiserror::Error;

use crate::message;
use crate::options::Key;

/// Result type for schema and loading operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Which check an [`OptionError`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Required option absent after defaulting
    Missing,
    /// Present option rejected by its validator
    Invalid,
}

/// A recoverable validation failure, returned as data from `validate`.
///
/// Each variant carries every offending key discovered in one call, in
/// schema declaration order. The key list is never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("{}", message::render(ErrorKind::Missing, .keys))]
    Missing { keys: Vec<Key> },

    #[error("{}", message::render(ErrorKind::Invalid, .keys))]
    Invalid { keys: Vec<Key> },
}

impl OptionError {
    /// Build a missing-option error. Returns `None` for an empty key list.
    pub fn missing(keys: Vec<Key>) -> Option<Self> {
        (!keys.is_empty()).then_some(Self::Missing { keys })
    }

    /// Build an invalid-option error. Returns `None` for an empty key list.
    pub fn invalid(keys: Vec<Key>) -> Option<Self> {
        (!keys.is_empty()).then_some(Self::Invalid { keys })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OptionError::Missing { .. } => ErrorKind::Missing,
            OptionError::Invalid { .. } => ErrorKind::Invalid,
        }
    }

    /// The offending keys
    pub fn keys(&self) -> &[Key] {
        match self {
            OptionError::Missing { keys } | OptionError::Invalid { keys } => keys,
        }
    }
}

/// Schema declaration and loading errors.
///
/// These describe bugs in the calling code or its schema files, not bad
/// option values.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid directive for option {key}: {reason}")]
    InvalidDirective { key: Key, reason: String },

    #[error("Unknown validator '{name}' for option {key}")]
    UnknownValidator { key: Key, name: String },

    #[error("Invalid pattern for option {key}: {source}")]
    InvalidPattern {
        key: Key,
        #[source]
        source: regex::Error,
    },

    #[error("Unsupported schema file: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
