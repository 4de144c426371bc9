//! Error types for statement extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while collecting, reading, parsing or writing statements.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A line pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A numeric token could not be normalized into an amount
    #[error("Malformed amount '{token}': {reason}")]
    MalformedAmount { token: String, reason: String },

    /// The PDF could not be turned into text (corrupt, encrypted, ...)
    #[error("Cannot read document {}: {reason}", .path.display())]
    DocumentUnreadable { path: PathBuf, reason: String },

    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("File is not a PDF: {}", .0.display())]
    NotAPdf(PathBuf),

    /// A date token that is not `DD.MM.YYYY`
    #[error("Invalid date '{0}': expected DD.MM.YYYY")]
    InvalidDate(String),

    /// Discovery yielded no candidate documents
    #[error("No valid PDF files found")]
    NoInputFiles,

    /// Every document was empty or unreadable
    #[error("No transactions extracted")]
    NothingExtracted,

    /// A delimiter that cannot be written as a single byte
    #[error("Invalid delimiter '{0}': must be a single ASCII character")]
    InvalidDelimiter(char),
}

impl ExtractError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        ExtractError::MalformedAmount {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
