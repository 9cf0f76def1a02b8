//! dumpruns - Show the break decision for every adjacent item pair
//!
//! Prints one line per pair of a page with the cross-axis drift, the reading
//! gap, their thresholds, and the signal that split the pair, if any.

mod logging;

use clap::{ArgAction, Parser, ValueEnum};
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use textrun_core::error::Result;
use textrun_core::high_level::{Document, SegmentOptions};
use textrun_core::layout::{PairDecision, explain_breaks};
use textrun_core::{BreakPolicy, TextItem, WritingMode};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum ModeArg {
    #[default]
    Auto,
    Horizontal,
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

/// Show the run break decision for every adjacent pair of a page.
#[derive(Parser, Debug)]
#[command(name = "dumpruns")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON page dump
    file: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Writing mode of the page
    #[arg(short = 'w', long = "writing-mode", value_enum, default_value = "auto")]
    writing_mode: ModeArg,

    /// Also evaluate the colour, rotation, orientation and size signals
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,

    /// Page to inspect (1-indexed)
    #[arg(
        short = 'p',
        long,
        default_value = "1",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    page: usize,

    /// Only print pairs that split
    #[arg(short = 'b', long = "breaks-only", action = ArgAction::SetTrue)]
    breaks_only: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn write_decision<W: Write>(
    out: &mut W,
    items: &[TextItem],
    decision: &PairDecision,
) -> io::Result<()> {
    let prev = &items[decision.index - 1].text;
    let next = &items[decision.index].text;
    let verdict = decision.reason.map_or("join", |r| r.as_str());
    writeln!(
        out,
        "{:>5}  cross {:>8}/{:<8} gap {:>8.2}/{:<8.2} {:<22} {:?} -> {:?}",
        decision.index,
        fmt_opt(decision.cross_delta),
        fmt_opt(decision.cross_tolerance),
        decision.gap,
        decision.gap_threshold,
        verdict,
        prev,
        next,
    )
}

fn dumpruns<W: Write>(out: &mut W, doc: &Document, args: &Args) -> Result<()> {
    let page = doc.page(args.page - 1)?;
    let options = SegmentOptions {
        writing_mode: args.writing_mode.writing_mode(),
        policy: if args.strict {
            BreakPolicy::Strict
        } else {
            BreakPolicy::Geometry
        },
        ..Default::default()
    };
    let params = options.params_for(page);
    let decisions = explain_breaks(&params, &page.items);
    let breaks = decisions.iter().filter(|d| d.is_break()).count();

    writeln!(
        out,
        "page {} items {} mode {} runs {}",
        args.page,
        page.items.len(),
        params.writing_mode,
        if page.items.is_empty() { 0 } else { breaks + 1 },
    )?;
    for decision in &decisions {
        if args.breaks_only && !decision.is_break() {
            continue;
        }
        write_decision(out, &page.items, decision)?;
    }
    Ok(())
}

fn main() -> core::result::Result<(), Box<dyn core::error::Error>> {
    let args = Args::parse();
    logging::init_logging(args.debug);

    if !args.file.exists() {
        eprintln!("Error: File not found: {}", args.file.display());
        std::process::exit(1);
    }

    let file = File::open(&args.file)?;
    let mmap = unsafe { Mmap::map(&file) }?;
    let doc = Document::from_slice(&mmap)?;

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)?;
        Box::new(BufWriter::new(file))
    };

    if let Err(e) = dumpruns(&mut output, &doc, &args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    output.flush()?;
    Ok(())
}
