//! Extracted transaction records.

use crate::amount::Amount;
use crate::date::StatementDate;
use serde::Serialize;

/// One booking extracted from a statement.
///
/// A `Transaction` always carries both a date and an amount; incomplete
/// candidates never leave the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Booking date (`Datum`)
    #[serde(rename = "Datum")]
    pub date: StatementDate,

    /// Signed amount (`Betrag`), serialized in canonical German form
    #[serde(rename = "Betrag")]
    pub amount: Amount,

    /// Originating file (`Datei`), only set when filename tagging is enabled
    #[serde(rename = "Datei", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Transaction {
    pub fn new(date: StatementDate, amount: Amount) -> Self {
        Transaction {
            date,
            amount,
            source: None,
        }
    }

    /// Returns the transaction tagged with the document it came from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
