//! CSV output of extracted transactions.

use crate::config::OutputConfig;
use crate::error::Result;
use crate::transaction::Transaction;
use csv::WriterBuilder;
use std::io::Write;

/// Writes the header row and one row per transaction.
///
/// Columns are `Datum`, `Betrag` and, when `include_source` is set, `Datei`.
pub fn write_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
    config: &OutputConfig,
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);

    if config.include_source {
        csv_writer.write_record(["Datum", "Betrag", "Datei"])?;
    } else {
        csv_writer.write_record(["Datum", "Betrag"])?;
    }

    for tx in transactions {
        let date = tx.date.to_string();
        let amount = tx.amount.to_string();
        if config.include_source {
            let source = tx.source.as_deref().unwrap_or_default();
            csv_writer.write_record([date.as_str(), amount.as_str(), source])?;
        } else {
            csv_writer.write_record([date.as_str(), amount.as_str()])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
