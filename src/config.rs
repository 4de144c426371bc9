//! Configuration values passed into extraction and output.

use crate::amount::NumberFormat;
use crate::classifier::DEFAULT_STOP_MARKERS;
use crate::error::{ExtractError, Result};
use std::path::PathBuf;

/// Default CSV output file.
pub const DEFAULT_OUTPUT: &str = "auszuege.csv";

/// Default CSV field delimiter.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Settings for turning documents into transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Substrings that end the booking section of a document.
    pub stop_markers: Vec<String>,
    /// Tag every transaction with its source file.
    pub include_source: bool,
    pub number_format: NumberFormat,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            stop_markers: DEFAULT_STOP_MARKERS.iter().map(|m| m.to_string()).collect(),
            include_source: false,
            number_format: NumberFormat::GERMAN,
        }
    }
}

/// Settings for the CSV file written at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub delimiter: u8,
    /// Adds the `Datei` column.
    pub include_source: bool,
}

impl OutputConfig {
    /// Converts a user-supplied delimiter character into a CSV byte.
    pub fn delimiter_byte(delimiter: char) -> Result<u8> {
        if delimiter.is_ascii() && delimiter != '\n' && delimiter != '\r' && delimiter != '"' {
            Ok(delimiter as u8)
        } else {
            Err(ExtractError::InvalidDelimiter(delimiter))
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: DEFAULT_DELIMITER,
            include_source: false,
        }
    }
}
