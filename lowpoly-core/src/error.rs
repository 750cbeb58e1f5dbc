//! Error types for lowpoly

use thiserror::Error;

/// Main error type for lowpoly operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No geometry produced: {0}")]
    EmptyResult(String),

    #[error("Host error: {0}")]
    Host(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// True for the "nothing left to render" outcome, which callers usually
    /// report as a warning rather than a failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Error::EmptyResult(_))
    }
}

/// Result type alias for lowpoly operations
pub type Result<T> = std::result::Result<T, Error>;
