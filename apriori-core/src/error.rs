//! Typed errors for the loading and configuration edges of the pipeline.
//!
//! Mining and rule generation are total over loaded data and never fail.

use thiserror::Error;

pub type AprioriResult<T> = std::result::Result<T, AprioriError>;

#[derive(Debug, Error)]
pub enum AprioriError {
    /// A transaction line held something other than an integer.
    #[error("ParseError: line {line}: invalid item '{token}'")]
    Parse { line: usize, token: String },

    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be decoded.
    #[error("ConfigError: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("SerializationError: {0}")]
    Serialization(#[from] serde_json::Error),
}
