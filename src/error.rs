//! Error types for todo-highlight

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for todo-highlight operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error types
///
/// Scanning and cycling never fail; everything here comes from building a
/// token set, loading configuration, or touching files.
#[derive(Error, Debug)]
pub enum TodoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No states configured")]
    NoStates,

    #[error("Empty token for state '{0}'")]
    EmptyToken(String),

    #[error("Token {0:?} must not start with whitespace or contain a newline")]
    InvalidToken(String),

    #[error("Duplicate token {0:?}")]
    DuplicateToken(String),

    #[error("Token {shorter:?} overlaps token {longer:?}")]
    OverlappingTokens { shorter: String, longer: String },

    #[error("Invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// `line` is 1-based, as typed on the command line
    #[error("Line {line} out of range (document has {count} lines)")]
    LineOutOfRange { line: usize, count: usize },

    #[error("{0}")]
    Usage(String),
}
