//! Statement Extractor CLI
//!
//! Reads German bank statement PDFs and writes their bookings (date and
//! amount) to a semicolon-separated CSV file.
//!
//! # Usage
//!
//! ```bash
//! statement-extractor --file auszug.pdf
//! statement-extractor --dir statements/ --out 2024.csv --add-filename
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` for per-line and per-file details
//!   (default `warn`)

use clap::{Args, Parser};
use statement_extractor::config::DEFAULT_OUTPUT;
use statement_extractor::{
    collect_files, write_transactions, BatchReport, ExtractConfig, ExtractError, Extractor, Input,
    OutputConfig, PdfTextExtractor, Result,
};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "statement-extractor",
    version,
    about = "Extracts date and amount from bank statement PDFs into a CSV."
)]
struct Cli {
    #[command(flatten)]
    source: Source,

    /// Output CSV path
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Include the source file name in the output
    #[arg(long)]
    add_filename: bool,

    /// Field delimiter of the output file
    #[arg(long, value_name = "CHAR", default_value_t = ';')]
    delimiter: char,

    /// Text that ends the bookings of a document (repeatable, replaces the defaults)
    #[arg(long = "stop-marker", value_name = "TEXT")]
    stop_markers: Vec<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// Single PDF file
    #[arg(short, long, value_name = "PDF")]
    file: Option<PathBuf>,

    /// Folder with PDFs, searched recursively
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let input = match (cli.source.file, cli.source.dir) {
        (Some(file), _) => Input::File(file),
        (None, Some(dir)) => Input::Directory(dir),
        (None, None) => return Err(ExtractError::NoInputFiles),
    };

    let output = OutputConfig {
        path: cli.out,
        delimiter: OutputConfig::delimiter_byte(cli.delimiter)?,
        include_source: cli.add_filename,
    };

    let mut config = ExtractConfig {
        include_source: cli.add_filename,
        ..ExtractConfig::default()
    };
    if !cli.stop_markers.is_empty() {
        config.stop_markers = cli.stop_markers;
    }

    let files = collect_files(&input)?;
    if files.is_empty() {
        return Err(ExtractError::NoInputFiles);
    }

    let extractor = Extractor::new(&config)?;
    let report = extractor.extract_files(&files, &PdfTextExtractor::new());

    if report.is_empty() {
        print_failures(&report);
        return Err(ExtractError::NothingExtracted);
    }

    if let Some(parent) = output.path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(&output.path)?;
    write_transactions(BufWriter::new(file), &report.transactions, &output)?;

    println!(
        "Done. {} transactions from {}/{} file(s) -> {}",
        report.transactions.len(),
        report.processed,
        report.total_files(),
        output.path.display()
    );
    print_failures(&report);

    Ok(())
}

fn print_failures(report: &BatchReport) {
    if report.failed.is_empty() {
        return;
    }
    eprintln!("\nFailed to process {} file(s):", report.failed.len());
    for (path, error) in &report.failed {
        eprintln!("  {}: {}", path.display(), error);
    }
}
