//! Inspect a steno dictionary file: entry count, sample entries, and
//! exact / prefix queries from the command line.

use anyhow::{Context, Result};
use clap::Parser;
use libsteno_core::{Config, StenoDict, StenoOrder, StrokeSequence};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Inspect a steno dictionary file")]
struct Args {
    /// Dictionary JSON file
    dict: PathBuf,

    /// Exact outline to look up, e.g. "S-/K-"
    #[arg(long)]
    exact: Option<String>,

    /// Outline prefix to enumerate candidates for, e.g. "S-/K-"
    #[arg(long)]
    prefix: Option<String>,

    /// Number of sample entries to print
    #[arg(long, default_value_t = 10)]
    sample: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let dict = StenoDict::load_json(&args.dict)
        .with_context(|| format!("loading {}", args.dict.display()))?;
    println!("{}: {} entries", args.dict.display(), dict.len());

    for (outline, text) in dict.iter().take(args.sample) {
        println!("  {:<24} {}", outline, text);
    }

    if let Some(outline) = &args.exact {
        match dict.lookup_outline(outline) {
            Some(text) => println!("exact {:?} -> {:?}", outline, text),
            None => println!("exact {:?} -> no match", outline),
        }
    }

    if let Some(prefix) = &args.prefix {
        let order = StenoOrder::new(&Config::default().steno_order);
        let seq = StrokeSequence::parse(prefix, &order);
        let candidates = dict.candidates_for(&seq);
        println!("{} candidates for {:?}:", candidates.len(), prefix);
        for c in candidates {
            println!("  {:<24} {}", c.outline, c.text);
        }
    }

    Ok(())
}
