//! Per-document line-scanning state machine.
//!
//! Statements often print a booking's date on one line and its amount on a
//! following line. The parser pairs an amount line with the most recent
//! unmatched date, lets a new date supersede an unresolved one, and stops
//! reading the document at the first stop-marker line.

use crate::amount::Amount;
use crate::classifier::{LineClass, LineClassifier};
use crate::date::StatementDate;
use crate::transaction::Transaction;
use log::debug;

/// Progress through one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// No pending date.
    Idle,
    /// A date was seen and still waits for its amount.
    AwaitingAmount(StatementDate),
    /// A stop marker was seen; the remaining lines are skipped.
    Halted,
}

/// Parses the lines of a single document.
///
/// A fresh parser must be used for every document. Pending state left over
/// when the document ends is discarded, never flushed.
///
/// # Example
///
/// ```
/// use statement_extractor::{DocumentParser, LineClassifier, NumberFormat};
///
/// let classifier = LineClassifier::new(["Neuer Saldo"], NumberFormat::GERMAN).unwrap();
/// let mut parser = DocumentParser::new(&classifier);
/// for line in ["01.03.2024 Miete", "-950,00", "Neuer Saldo", "05.03.2024 1,00"] {
///     parser.push_line(line);
/// }
/// let transactions = parser.finish();
/// assert_eq!(transactions.len(), 1);
/// assert_eq!(transactions[0].amount.to_string(), "-950,00");
/// ```
pub struct DocumentParser<'a> {
    classifier: &'a LineClassifier,
    state: ParseState,
    transactions: Vec<Transaction>,
    line_no: usize,
}

impl<'a> DocumentParser<'a> {
    pub fn new(classifier: &'a LineClassifier) -> Self {
        DocumentParser {
            classifier,
            state: ParseState::Idle,
            transactions: Vec::new(),
            line_no: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == ParseState::Halted
    }

    /// Feeds the next line of the document.
    pub fn push_line(&mut self, line: &str) {
        if self.is_halted() {
            return;
        }
        self.line_no += 1;

        let class = self.classifier.classify(line);
        self.state = self.transition(class);
    }

    fn transition(&mut self, class: LineClass) -> ParseState {
        match (self.state, class) {
            (ParseState::Halted, _) => ParseState::Halted,
            (state, LineClass::Noise) => state,
            (ParseState::AwaitingAmount(pending), LineClass::Stop) => {
                debug!(
                    "Line {}: stop marker, discarding pending date {}",
                    self.line_no, pending
                );
                ParseState::Halted
            }
            (ParseState::Idle, LineClass::Stop) => {
                debug!("Line {}: stop marker, halting document", self.line_no);
                ParseState::Halted
            }
            (ParseState::Idle, LineClass::Amount(amount)) => {
                debug!(
                    "Line {}: amount {} without pending date, ignoring",
                    self.line_no, amount
                );
                ParseState::Idle
            }
            (ParseState::AwaitingAmount(date), LineClass::Amount(amount)) => {
                self.emit(date, amount);
                ParseState::Idle
            }
            (state, LineClass::Date { date, trailing_amount }) => {
                if let ParseState::AwaitingAmount(superseded) = state {
                    debug!(
                        "Line {}: date {} superseded by {} before an amount was found",
                        self.line_no, superseded, date
                    );
                }
                match trailing_amount {
                    Some(amount) => {
                        self.emit(date, amount);
                        ParseState::Idle
                    }
                    None => ParseState::AwaitingAmount(date),
                }
            }
        }
    }

    fn emit(&mut self, date: StatementDate, amount: Amount) {
        debug!("Line {}: booking {} {}", self.line_no, date, amount);
        self.transactions.push(Transaction::new(date, amount));
    }

    /// Ends the document and returns its transactions in line order.
    pub fn finish(self) -> Vec<Transaction> {
        if let ParseState::AwaitingAmount(pending) = self.state {
            debug!("End of document, discarding pending date {}", pending);
        }
        self.transactions
    }
}

/// Runs a fresh [`DocumentParser`] over `lines`.
pub fn parse_lines<I, S>(classifier: &LineClassifier, lines: I) -> Vec<Transaction>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DocumentParser::new(classifier);
    for line in lines {
        if parser.is_halted() {
            break;
        }
        parser.push_line(line.as_ref());
    }
    parser.finish()
}
