//! PDF text extraction.
//!
//! The parser only needs lines of text; [`TextExtractor`] is the seam that
//! produces them, and [`PdfTextExtractor`] is the `lopdf` implementation.

use crate::error::{ExtractError, Result};
use log::{debug, warn};
use lopdf::Document;
use std::path::Path;

/// Produces the ordered text lines of a document (page order, then line order).
pub trait TextExtractor {
    fn extract_lines(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads text from PDF files with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        PdfTextExtractor
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_lines(&self, path: &Path) -> Result<Vec<String>> {
        let unreadable = |reason: String| ExtractError::DocumentUnreadable {
            path: path.to_path_buf(),
            reason,
        };

        let doc = Document::load(path).map_err(|e| {
            let reason = e.to_string();
            let lowered = reason.to_lowercase();
            if lowered.contains("password") || lowered.contains("decrypt") {
                unreadable("document is password-protected".to_string())
            } else {
                unreadable(reason)
            }
        })?;

        let pages = doc.get_pages();
        if pages.is_empty() {
            warn!("PDF file appears to be empty: {}", path.display());
            return Ok(Vec::new());
        }

        let mut lines = Vec::new();
        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => lines.extend(split_lines(&text)),
                Err(e) => {
                    warn!(
                        "Could not extract text from page {} in {}: {}",
                        page_num,
                        path.display(),
                        e
                    );
                }
            }
        }

        debug!("{}: {} lines of text", path.display(), lines.len());
        Ok(lines)
    }
}

/// Splits page text into trimmed lines, keeping empty ones out.
pub fn split_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_lines() {
        let lines: Vec<_> = split_lines("  01.03.2024 Miete \r\n\n -950,00\n").collect();
        assert_eq!(lines, vec!["01.03.2024 Miete", "-950,00"]);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfTextExtractor::new().extract_lines(&dir.path().join("missing.pdf"));
        assert!(matches!(
            result,
            Err(ExtractError::DocumentUnreadable { .. })
        ));
    }

    #[test]
    fn test_corrupt_file_is_unreadable() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let result = PdfTextExtractor::new().extract_lines(file.path());
        match result {
            Err(ExtractError::DocumentUnreadable { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("Expected DocumentUnreadable, got {:?}", other),
        }
    }
}
