//! Error types for histview_core operations.
//!
//! The history cache itself never fails: malformed diff records, duplicate
//! inserts, inserts into a locked store and missed lookups are all absorbed
//! locally. Errors only surface from the edges of the crate (identifier
//! parsing, log-text ingestion, configuration and serialization).

use thiserror::Error;

/// Core error type for histview_core operations.
#[derive(Error, Debug)]
pub enum HistError {
    /// Identifier is not a full-length hex commit hash.
    #[error("invalid sha: {0}")]
    InvalidSha(String),

    /// A line of pre-captured log text could not be turned into a commit.
    #[error("malformed log record at line {line}: {reason}")]
    MalformedLogRecord {
        /// 1-based line number in the input text
        line: usize,
        /// Description of what's wrong
        reason: String,
    },

    /// Serialization error when exporting records.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HistError {
    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MalformedLogRecord { .. } => Some(
                "Capture the log with: git log --boundary --parents --format='%m%H %P%x09%an%x09%at%x09%s'",
            ),
            Self::InvalidSha(_) => Some("Use the full 40 (or 64) character commit hash."),
            Self::ConfigError(_) => Some("Check histview.toml, or delete it to fall back to defaults."),
            _ => None,
        }
    }
}

/// Convenience Result type for histview_core operations.
pub type Result<T> = std::result::Result<T, HistError>;
