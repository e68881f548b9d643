//! Error types for forumctx operations.
//!
//! The analyzers themselves never fail: missing structure degrades to empty
//! or zero results. Errors come from the edges of the engine, where raw
//! provider records are validated, configuration is loaded and compiled,
//! and the tree builder is asked to reject duplicate identities.
//!
//! # Example
//!
//! ```rust
//! use forumctx_core::{ForumCtxError, Result};
//!
//! fn require_username(name: Option<&str>) -> Result<String> {
//!     match name {
//!         Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
//!         _ => Err(ForumCtxError::InvalidInput { record: "user", field: "username" }),
//!     }
//! }
//! # assert!(require_username(None).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the engine and its provider boundary.
#[derive(Error, Debug)]
pub enum ForumCtxError {
    /// A raw record is missing a required field.
    ///
    /// Returned at the provider boundary so that upstream data corruption
    /// is surfaced instead of being silently defaulted.
    #[error("Invalid input: {record} record is missing required field `{field}`")]
    InvalidInput { record: &'static str, field: &'static str },

    /// A lookup at the provider boundary found nothing for the given key.
    #[error("Invalid input: no {record} found for `{key}`")]
    NotFound { record: &'static str, key: String },

    /// Two comment records share an identity.
    ///
    /// Only returned when the duplicate policy is set to reject.
    #[error("Duplicate comment identity: {0}")]
    DuplicateId(String),

    /// A configured pattern could not be compiled.
    #[error("Invalid pattern `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration errors.
    ///
    /// Returned when a configuration file is unreadable or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON (de)serialization errors for bundles, configs and output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading inputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForumCtxError {
    /// Whether this error signals malformed caller input rather than an
    /// environment problem.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ForumCtxError::InvalidInput { .. } | ForumCtxError::NotFound { .. } | ForumCtxError::DuplicateId(_)
        )
    }
}

/// Result type alias for ForumCtxError.
pub type Result<T> = std::result::Result<T, ForumCtxError>;
