//! # Statement Extractor
//!
//! Extracts dated transactions from the text of German bank statements and
//! writes them to a delimited file.
//!
//! ## Design Principles
//!
//! - **Line-scanning state machine**: a date line waits for its amount on a
//!   later line; a stop-marker line ends the document
//! - **Exact amounts**: `rust_decimal` with 2 decimal places, written back in
//!   canonical German form (`-1.234,56`)
//! - **Contained failures**: malformed amounts are skipped per line, unreadable
//!   documents per file
//! - **Deterministic output**: documents in discovery order, bookings in line order
//!
//! ## Example
//!
//! ```
//! use statement_extractor::{ExtractConfig, Extractor};
//!
//! let extractor = Extractor::new(&ExtractConfig::default()).unwrap();
//! let transactions = extractor.parse_document([
//!     "01.03.2024 Miete",
//!     "-950,00",
//!     "Zinsertrag",
//!     "05.03.2024",
//!     "100,00",
//! ]);
//! assert_eq!(transactions.len(), 1);
//! assert_eq!(transactions[0].date.to_string(), "01.03.2024");
//! assert_eq!(transactions[0].amount.to_string(), "-950,00");
//! ```

pub mod amount;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod date;
pub mod discover;
pub mod error;
pub mod parser;
pub mod pdf;
pub mod transaction;
pub mod writer;

pub use amount::{Amount, NumberFormat};
pub use batch::{BatchReport, Extractor};
pub use classifier::{LineClass, LineClassifier, DEFAULT_STOP_MARKERS};
pub use config::{ExtractConfig, OutputConfig};
pub use date::StatementDate;
pub use discover::{collect_files, Input};
pub use error::{ExtractError, Result};
pub use parser::{parse_lines, DocumentParser, ParseState};
pub use pdf::{PdfTextExtractor, TextExtractor};
pub use transaction::Transaction;
pub use writer::write_transactions;
