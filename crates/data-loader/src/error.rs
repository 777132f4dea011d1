//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while reading and parsing catalog files
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File content is not the expected JSON shape
    ///
    /// `line` and `column` come straight from serde_json and are 1-based
    #[error("Parse error at line {line}, column {column} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        column: usize,
        reason: String,
    },
}

impl DataLoadError {
    pub(crate) fn parse(file: &str, err: serde_json::Error) -> Self {
        DataLoadError::ParseError {
            file: file.to_string(),
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
