//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        IoError::ParseError {
            line,
            message: message.into(),
        }
    }
}

impl From<IoError> for lowpoly_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::InvalidFormat { format } => lowpoly_core::Error::UnsupportedFormat(format),
            IoError::ParseError { line, message } => lowpoly_core::Error::Parse { line, message },
            IoError::WriteError { message } => {
                lowpoly_core::Error::Io(std::io::Error::other(message))
            }
            IoError::Io(e) => lowpoly_core::Error::Io(e),
        }
    }
}
