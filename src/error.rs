//! Error types for the tablet reconstructor library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A filter parameter cannot be used as given
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Host tried to set a property the filter does not expose
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// Filter initialization or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Malformed line in a sample stream
    #[error("Parse error on line {line}: {message}")]
    ParseError {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
