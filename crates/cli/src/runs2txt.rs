//! runs2txt - Segment positioned text items into runs
//!
//! Reads JSON page dumps (pdf.js-style text items) and writes one line per
//! run, or a JSON description of every run.

mod logging;

use clap::{ArgAction, Parser, ValueEnum};
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use textrun_core::converter::{JsonConverter, TextConverter};
use textrun_core::error::Result;
use textrun_core::high_level::{Document, PageRuns, SegmentOptions, segment_pages};
use textrun_core::{BreakPolicy, WritingMode};
use tracing::debug;

/// Writing mode to segment with.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum ModeArg {
    /// Use the page's declared mode, or infer it from the items (default)
    #[default]
    Auto,
    /// Lines flow left to right
    Horizontal,
    /// Columns flow top to bottom
    Vertical,
}

impl ModeArg {
    fn writing_mode(self) -> Option<WritingMode> {
        match self {
            Self::Auto => None,
            Self::Horizontal => Some(WritingMode::Horizontal),
            Self::Vertical => Some(WritingMode::Vertical),
        }
    }
}

/// Output type for the segmented runs.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// One run per line, pages separated by form feeds (default)
    #[default]
    Text,
    /// Runs with item indices and bounds
    Json,
}

/// Segment positioned text items into runs.
#[derive(Parser, Debug)]
#[command(name = "runs2txt")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// One or more JSON page dumps
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Segmentation options ===
    /// Writing mode of the pages
    #[arg(short = 'w', long = "writing-mode", value_enum, default_value = "auto")]
    writing_mode: ModeArg,

    /// Also break on colour, rotation, orientation and size changes
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,

    /// Page numbers to segment in each file (1-indexed, space- or comma-separated)
    #[arg(
        long = "page-numbers",
        num_args = 1..,
        value_delimiter = ',',
        value_parser = parse_page_number
    )]
    page_numbers: Option<Vec<usize>>,

    /// The maximum number of pages to segment (0 = no limit)
    #[arg(short = 'm', long, default_value = "0")]
    maxpages: usize,

    /// Worker threads (0 = available parallelism)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,

    /// Written after every run in text output
    #[arg(long = "run-separator", default_value = "\n")]
    run_separator: String,

    /// Print a "Page N" header before each page in text output
    #[arg(long = "show-pageno", action = ArgAction::SetTrue)]
    show_pageno: bool,

    /// Pretty-print JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Parse one 1-indexed page number into a zero-based index.
fn parse_page_number(s: &str) -> std::result::Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid page number: {s}"))?;
    if n == 0 {
        return Err("page numbers start at 1".to_string());
    }
    Ok(n - 1)
}

fn build_options(args: &Args) -> SegmentOptions {
    SegmentOptions {
        writing_mode: args.writing_mode.writing_mode(),
        policy: if args.strict {
            BreakPolicy::Strict
        } else {
            BreakPolicy::Geometry
        },
        page_numbers: args.page_numbers.clone(),
        maxpages: args.maxpages,
        threads: args.threads,
    }
}

/// Converter shared by every input file.
enum Sink<'a, W: Write> {
    Text(TextConverter<'a, W>),
    Json(JsonConverter<'a, W>),
}

impl<'a, W: Write> Sink<'a, W> {
    fn new(writer: &'a mut W, args: &Args) -> Self {
        match args.output_type {
            OutputType::Text => Self::Text(
                TextConverter::new(writer, args.show_pageno)
                    .with_run_separator(args.run_separator.as_str()),
            ),
            OutputType::Json => Self::Json(JsonConverter::new(writer, args.pretty)),
        }
    }

    fn receive(&mut self, page_index: usize, page: &PageRuns<'_>) -> Result<()> {
        match self {
            Self::Text(converter) => converter.receive_runs(page_index, &page.runs),
            Self::Json(converter) => {
                converter.receive_runs(page_index, page.writing_mode, &page.runs);
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<()> {
        match self {
            Self::Text(_) => Ok(()),
            Self::Json(converter) => converter.finish(),
        }
    }
}

/// Read a JSON page dump.
fn load_file(path: &Path) -> Result<Document> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file) }?;
    let doc = Document::from_slice(&mmap)?;
    debug!(path = %path.display(), pages = doc.len(), "read document");
    Ok(doc)
}

/// Segment every document into one output.
///
/// Pages are numbered across documents in input order, so the output of
/// several files reads as one document.
fn convert_documents<W: Write>(docs: &[Document], writer: &mut W, args: &Args) -> Result<()> {
    let options = build_options(args);
    let mut sink = Sink::new(writer, args);
    let mut page_offset = 0;
    for doc in docs {
        for page in segment_pages(doc, &options)? {
            sink.receive(page_offset + page.page_index, &page)?;
        }
        page_offset += doc.len();
    }
    sink.finish()
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_logging(args.debug);

    // Load every input before writing anything
    let mut docs = Vec::with_capacity(args.files.len());
    for path in &args.files {
        if !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }

        match load_file(path) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                eprintln!("Error processing {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    if let Err(e) = convert_documents(&docs, &mut output, &args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    // Ensure output is flushed
    output.flush()?;

    Ok(())
}
