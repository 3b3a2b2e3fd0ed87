//! assay-explore: Fetch a JSON API and print it as a flat table
//!
//! Usage:
//!   # Preview the first 100 rows as JSON
//!   assay-explore https://api.example.com/users
//!
//!   # Add query parameters, drop a field, rename another, emit CSV
//!   assay-explore https://api.example.com/users --param page=2 \
//!       --exclude address.zip --rename email=correo_electronico --format csv --all
//!
//!   # POST with a JSON body and an auth header
//!   assay-explore https://api.example.com/search --method post \
//!       --header "Authorization: Bearer $TOKEN" --body '{"q": "ana"}'
//!
//!   # Show detected fields and their default mappings
//!   assay-explore https://api.example.com/users --format fields

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{anyhow, bail, Context, Result};
use assay::mapping::{to_csv, to_json_pretty};
use assay::{ExplorerConfig, ExplorerSession, HttpFetcher, HttpMethod};
use clap::{Parser, ValueEnum};
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Fields,
}

#[derive(Parser, Debug)]
#[command(name = "assay-explore")]
#[command(about = "Fetch a JSON API and flatten its records into a table", long_about = None)]
struct Args {
    /// API URL to fetch
    #[arg(value_name = "URL")]
    url: String,

    /// HTTP method (GET or POST)
    #[arg(long, short = 'X', default_value = "GET")]
    method: HttpMethod,

    /// Request header as "Name: value" (repeatable)
    #[arg(long, short = 'H', value_name = "NAME:VALUE")]
    header: Vec<String>,

    /// Request body for POST; sent as JSON when it parses as JSON
    #[arg(long)]
    body: Option<String>,

    /// Query parameter as key=value (repeatable)
    #[arg(long, short = 'p', value_name = "KEY=VALUE")]
    param: Vec<String>,

    /// Dotted field path to leave out of the output (repeatable)
    #[arg(long, value_name = "PATH")]
    exclude: Vec<String>,

    /// Rename a field's output column as path=name (repeatable)
    #[arg(long, value_name = "PATH=NAME")]
    rename: Vec<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print every row instead of the preview
    #[arg(long)]
    all: bool,

    /// Request timeout in seconds (default: 30)
    #[arg(long, env = "ASSAY_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Number of rows in the preview (default: 100)
    #[arg(long, env = "ASSAY_PREVIEW_ROWS")]
    preview_rows: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Build config
    let mut config = ExplorerConfig::default();
    if let Some(secs) = args.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(rows) = args.preview_rows {
        config.preview_rows = rows;
    }

    let fetcher = HttpFetcher::new(&config).context("Failed to build HTTP client")?;
    let mut session = ExplorerSession::new(&config);

    session.set_url(args.url.clone());
    session.apply(assay::Action::SetMethod(args.method))?;
    session.apply(assay::Action::SetBody(args.body.clone()))?;
    for header in &args.header {
        let (name, value) = split_pair(header, ':')?;
        session.set_header(name, value);
    }
    for param in &args.param {
        let (key, value) = split_pair(param, '=')?;
        session.add_param(key, value);
    }

    session.fetch(&fetcher).await;

    if let Some(error) = session.error() {
        bail!("{}", error);
    }
    if let Some(warning) = session.warning() {
        eprintln!("⚠ Warning: {}", warning);
    }

    for path in &args.exclude {
        session.set_field_selected(path, false)?;
    }
    for rename in &args.rename {
        let (path, name) = split_pair(rename, '=')?;
        session.rename_field(path, name)?;
    }

    let rows = if args.all {
        session.standardized_data()
    } else {
        session.preview()
    };

    let output = match args.format {
        OutputFormat::Json => to_json_pretty(rows)?,
        OutputFormat::Csv => to_csv(rows, session.field_mappings())?,
        OutputFormat::Fields => fields_report(&session)?,
    };

    println!("{}", output.trim_end());

    Ok(())
}

/// Split "left<sep>right", trimming both halves
fn split_pair(input: &str, separator: char) -> Result<(&str, &str)> {
    input
        .split_once(separator)
        .map(|(left, right)| (left.trim(), right.trim()))
        .filter(|(left, _)| !left.is_empty())
        .ok_or_else(|| anyhow!("Expected '<name>{}<value>', got '{}'", separator, input))
}

fn fields_report(session: &ExplorerSession) -> Result<String> {
    let report = serde_json::json!({
        "structure_type": session.structure_type(),
        "pagination": session.pagination(),
        "records": session.records().len(),
        "fields": session.detected_fields(),
        "mappings": session.field_mappings(),
    });
    serde_json::to_string_pretty(&report).context("Failed to serialize field report")
}
