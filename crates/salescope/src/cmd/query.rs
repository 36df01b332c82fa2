//! salescope-query - Run a cataloged query against a transaction CSV.
//!
//! # Usage
//!
//! ```bash
//! salescope-query transactions.csv 1
//! salescope-query transactions.csv 10 -f json
//! salescope-query transactions.csv --list
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use salescope_query::Executor;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::importer;
use crate::render;

/// Run a cataloged query against a transaction CSV.
#[derive(Parser, Debug)]
#[command(name = "salescope-query")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The transaction CSV file to query
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Catalog query id to execute
    #[arg(value_name = "QUERY_ID")]
    query: Option<u16>,

    /// List available queries and exit
    #[arg(short, long)]
    list: bool,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Output format (text, csv, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Main entry point for the query command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if args.list {
        let mut stdout = io::stdout();
        for (id, label) in salescope_query::list_queries() {
            writeln!(stdout, "{id:>3}  {label}")?;
        }
        return Ok(());
    }

    if !args.file.exists() {
        anyhow::bail!("file not found: {}", args.file.display());
    }

    let Some(id) = args.query else {
        anyhow::bail!("no query id given (use --list to see available queries)");
    };

    let table = importer::import_file(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    info!(rows = table.len(), "loaded transaction table");

    let executor = Executor::new(&table);
    let result = executor
        .execute(id)
        .with_context(|| format!("failed to execute query {id}"))?;

    match args.output {
        Some(ref path) => {
            let mut file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_result(&result, args.format, &mut file)
        }
        None => write_result(&result, args.format, &mut io::stdout()),
    }
}

fn write_result<W: Write>(
    result: &salescope_query::QueryResult,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => render::write_text(result, writer),
        OutputFormat::Csv => render::write_csv(result, writer),
        OutputFormat::Json => render::write_json(result, writer),
    }
}
