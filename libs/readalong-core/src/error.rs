//! Error types for readalong-core.

use crate::types::Side;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// The only way a comparison can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("{side} has {count} tokens, limit is {max}")]
    InputTooLarge { side: Side, count: usize, max: usize },
}

/// Invalid engine configuration, rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("similarity threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("severity weight for {severity} must be finite and non-negative, got {value}")]
    InvalidWeight { severity: &'static str, value: f64 },

    #[error("max token count must be greater than zero")]
    InvalidTokenLimit,
}

/// Errors that can occur while parsing a passage file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing text at line {line}")]
    MissingText { line: usize },

    #[error("invalid ID format at line {line}: {value}")]
    InvalidId { line: usize, value: String },

    #[error("duplicate ID {id} at line {line}")]
    DuplicateId { id: i64, line: usize },

    #[error("invalid threshold at line {line}: {value}")]
    InvalidThreshold { line: usize, value: String },
}
