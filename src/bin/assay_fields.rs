//! assay-fields: Report the structure, fields and default mappings of a JSON document
//!
//! Usage:
//!   # Read from file, output to stdout
//!   assay-fields response.json
//!
//!   # Read from stdin with compact output
//!   curl -s https://api.example.com/users | assay-fields --compact

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use assay::fetch::decode_body;
use assay::{analyze, MappingSet};
use clap::Parser;
use std::fs::File;
use std::io::{stdin, BufReader, Read};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "assay-fields")]
#[command(about = "Detect structure, fields and default mappings of a JSON document", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Create reader based on input source
    let mut reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(BufReader::new(
            File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?,
        ))
    } else {
        Box::new(BufReader::new(stdin()))
    };

    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    let raw = decode_body(content)?;
    let analysis = analyze(&raw);
    let mappings = MappingSet::from_fields(&analysis.detected_fields);

    if analysis.records.is_empty() {
        eprintln!("Warning: No records found in input");
    }

    let report = serde_json::json!({
        "structure_type": analysis.structure_type,
        "pagination": analysis.pagination,
        "records": analysis.records.len(),
        "fields": analysis.detected_fields,
        "mappings": mappings.as_slice(),
    });

    let output = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };

    println!("{}", output);

    Ok(())
}
