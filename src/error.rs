//! Error types.
//!
//! Scoring itself cannot fail; only loading configuration can.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O error reading config file.
    #[error("I/O error: {0}")]
    IoError(String),
    /// Parse error in config file.
    #[error("Parse error: {0}")]
    ParseError(String),
}
