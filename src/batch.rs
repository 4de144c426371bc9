//! Batch extraction across documents.
//!
//! Every document gets a fresh parser; results are concatenated in document
//! order, then line order within each document. A broken or empty document
//! never aborts the batch.

use crate::classifier::LineClassifier;
use crate::config::ExtractConfig;
use crate::error::{ExtractError, Result};
use crate::parser::parse_lines;
use crate::pdf::TextExtractor;
use crate::transaction::Transaction;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Outcome of extracting a set of files.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// All transactions, in discovery order.
    pub transactions: Vec<Transaction>,
    /// Number of documents whose text could be read.
    pub processed: usize,
    /// Documents that were readable but held no transactions.
    pub empty: Vec<PathBuf>,
    /// Documents that could not be read, with the reason.
    pub failed: Vec<(PathBuf, ExtractError)>,
}

impl BatchReport {
    pub fn total_files(&self) -> usize {
        self.processed + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Applies the document parser to many documents with one shared configuration.
pub struct Extractor {
    classifier: LineClassifier,
    include_source: bool,
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Extractor {
            classifier: LineClassifier::new(
                config.stop_markers.iter().cloned(),
                config.number_format,
            )?,
            include_source: config.include_source,
        })
    }

    /// Parses a single document without tagging.
    pub fn parse_document<I, S>(&self, lines: I) -> Vec<Transaction>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        parse_lines(&self.classifier, lines)
    }

    /// Extracts transactions from `(identifier, lines)` pairs.
    ///
    /// Records are tagged with the identifier when `include_source` is set.
    /// Documents without lines contribute nothing.
    pub fn extract<D, I, L, S>(&self, documents: D) -> Vec<Transaction>
    where
        D: IntoIterator<Item = (I, L)>,
        I: Into<String>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for (id, lines) in documents {
            let transactions = self.parse_document(lines);
            self.append(&mut out, id.into(), transactions);
        }
        out
    }

    /// Reads every file through `extractor` and extracts its transactions.
    ///
    /// Unreadable files are recorded in [`BatchReport::failed`] and skipped.
    pub fn extract_files<E: TextExtractor>(&self, files: &[PathBuf], extractor: &E) -> BatchReport {
        let mut report = BatchReport::default();

        for path in files {
            let lines = match extractor.extract_lines(path) {
                Ok(lines) => lines,
                Err(e) => {
                    warn!("Error processing {}: {}", path.display(), e);
                    report.failed.push((path.clone(), e));
                    continue;
                }
            };
            report.processed += 1;

            let transactions = self.parse_document(&lines);
            if transactions.is_empty() {
                warn!("No transactions found in {}", path.display());
                report.empty.push(path.clone());
                continue;
            }

            info!("{}: {} transaction(s)", path.display(), transactions.len());
            self.append(&mut report.transactions, display_name(path), transactions);
        }

        report
    }

    fn append(&self, out: &mut Vec<Transaction>, id: String, transactions: Vec<Transaction>) {
        if self.include_source {
            out.extend(transactions.into_iter().map(|tx| tx.with_source(id.as_str())));
        } else {
            out.extend(transactions);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeExtractor(HashMap<PathBuf, Option<Vec<&'static str>>>);

    impl TextExtractor for FakeExtractor {
        fn extract_lines(&self, path: &Path) -> Result<Vec<String>> {
            match self.0.get(path) {
                Some(Some(lines)) => Ok(lines.iter().map(|l| l.to_string()).collect()),
                _ => Err(ExtractError::DocumentUnreadable {
                    path: path.to_path_buf(),
                    reason: "corrupt".to_string(),
                }),
            }
        }
    }

    fn tagged_config() -> ExtractConfig {
        ExtractConfig {
            include_source: true,
            ..ExtractConfig::default()
        }
    }

    #[test]
    fn test_extract_concatenates_in_document_order() {
        let extractor = Extractor::new(&ExtractConfig::default()).unwrap();
        let out = extractor.extract([
            ("a.pdf", vec!["01.03.2024 1,00", "02.03.2024", "2,00"]),
            ("b.pdf", vec!["03.03.2024 3,00"]),
        ]);

        let amounts: Vec<_> = out.iter().map(|tx| tx.amount.to_string()).collect();
        assert_eq!(amounts, vec!["1,00", "2,00", "3,00"]);
        assert!(out.iter().all(|tx| tx.source.is_none()));
    }

    #[test]
    fn test_extract_tags_sources() {
        let extractor = Extractor::new(&tagged_config()).unwrap();
        let out = extractor.extract([
            ("leer.pdf", Vec::<&str>::new()),
            ("maerz.pdf", vec!["02.03.2024  120,50"]),
        ]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source.as_deref(), Some("maerz.pdf"));
        assert_eq!(out[0].amount.to_string(), "120,50");
    }

    #[test]
    fn test_state_does_not_leak_between_documents() {
        let extractor = Extractor::new(&ExtractConfig::default()).unwrap();
        let out = extractor.extract([
            ("a.pdf", vec!["01.03.2024 offen"]),
            ("b.pdf", vec!["-5,00"]),
            ("c.pdf", vec!["Zinsertrag"]),
            ("d.pdf", vec!["04.03.2024", "6,00"]),
        ]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date.to_string(), "04.03.2024");
    }

    #[test]
    fn test_extract_files_skips_unreadable_and_empty() {
        let mut docs = HashMap::new();
        docs.insert(PathBuf::from("kaputt.pdf"), None);
        docs.insert(PathBuf::from("leer.pdf"), Some(vec!["Kontoauszug"]));
        docs.insert(
            PathBuf::from("gut.pdf"),
            Some(vec!["01.03.2024 Miete", "-950,00"]),
        );
        let fake = FakeExtractor(docs);

        let files = [
            PathBuf::from("kaputt.pdf"),
            PathBuf::from("leer.pdf"),
            PathBuf::from("gut.pdf"),
        ];
        let extractor = Extractor::new(&tagged_config()).unwrap();
        let report = extractor.extract_files(&files, &fake);

        assert_eq!(report.total_files(), 3);
        assert_eq!(report.processed, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, PathBuf::from("kaputt.pdf"));
        assert_eq!(report.empty, vec![PathBuf::from("leer.pdf")]);
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].source.as_deref(), Some("gut.pdf"));
    }

    #[test]
    fn test_custom_stop_markers() {
        let config = ExtractConfig {
            stop_markers: vec!["Summe".to_string()],
            ..ExtractConfig::default()
        };
        let extractor = Extractor::new(&config).unwrap();
        let out = extractor.parse_document(["Zinsertrag", "01.03.2024 1,00", "Summe", "02.03.2024 2,00"]);
        assert_eq!(out.len(), 1);
    }
}
