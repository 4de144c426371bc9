//! Locating the statement PDFs to process.

use crate::error::{ExtractError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Where to look for statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A single PDF file.
    File(PathBuf),
    /// Every PDF below a directory, recursively.
    Directory(PathBuf),
}

/// Returns the documents to process in a deterministic order.
///
/// A directory is walked recursively and the collected paths are sorted.
pub fn collect_files(input: &Input) -> Result<Vec<PathBuf>> {
    match input {
        Input::File(path) => {
            if !path.exists() {
                return Err(ExtractError::InputNotFound(path.clone()));
            }
            if !is_pdf(path) {
                return Err(ExtractError::NotAPdf(path.clone()));
            }
            if !path.is_file() {
                return Err(ExtractError::NotAFile(path.clone()));
            }
            Ok(vec![path.clone()])
        }
        Input::Directory(path) => {
            if !path.exists() {
                return Err(ExtractError::InputNotFound(path.clone()));
            }
            if !path.is_dir() {
                return Err(ExtractError::NotADirectory(path.clone()));
            }

            let mut files = Vec::new();
            walk(path, &mut files)?;
            files.sort();
            debug!("Found {} PDF file(s) under {}", files.len(), path.display());
            Ok(files)
        }
    }
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.is_file() && is_pdf(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
