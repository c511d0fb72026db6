//! Error types for cachecarry
//!
//! All modules use `CarryResult<T>` as their return type. `NotFound`,
//! `NoOutputId` and `InvalidKey` only ever skip one build plan entry; the
//! transfer engine matches on them and treats everything else as fatal.

use std::path::PathBuf;
use thiserror::Error;

use crate::cache::KeyError;

/// Result type alias for cachecarry operations
pub type CarryResult<T> = Result<T, CarryError>;

/// All errors that can occur in cachecarry
#[derive(Error, Debug)]
pub enum CarryError {
    // Cache entry errors
    #[error("Invalid cache key {encoded:?}: {source}")]
    InvalidKey {
        encoded: String,
        #[source]
        source: KeyError,
    },

    #[error("No cache entry matched {0}")]
    NotFound(PathBuf),

    #[error("Index record has no output ID")]
    NoOutputId,

    // Build plan errors
    #[error("Failed to read build plan {path}: {reason}")]
    PlanRead { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl CarryError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid key error for an encoded value
    pub fn invalid_key(encoded: impl Into<String>, source: KeyError) -> Self {
        Self::InvalidKey {
            encoded: encoded.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::PlanRead { .. } => {
                Some("Generate the manifest with: go build -debug-actiongraph=actiongraph.json")
            }
            Self::ConfigInvalid { .. } => Some("Run: cachecarry config init --force"),
            _ => None,
        }
    }
}
