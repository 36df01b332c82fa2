//! salescope-report - Run the full query catalog over a transaction CSV.
//!
//! # Usage
//!
//! ```bash
//! salescope-report transactions.csv
//! salescope-report transactions.csv --stats
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use salescope_query::{definitions, Executor};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::importer;
use crate::render;

/// Run every cataloged query and print the results.
#[derive(Parser, Debug)]
#[command(name = "salescope-report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The transaction CSV file to process
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Show table statistics instead of query results
    #[arg(long)]
    stats: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Main entry point for the report command.
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
    let mut stdout = io::stdout().lock();

    if !args.file.exists() {
        anyhow::bail!("file not found: {}", args.file.display());
    }

    let table = importer::import_file(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    if args.stats {
        return write_stats(&table, &mut stdout);
    }

    let executor = Executor::new(&table);
    for def in definitions() {
        writeln!(stdout, "=== [{:>2}] {}", def.id, def.label)?;
        let result = executor
            .execute(def.id)
            .with_context(|| format!("failed to execute query {}", def.id))?;
        render::write_text(&result, &mut stdout)?;
        writeln!(stdout)?;
    }

    Ok(())
}

fn write_stats<W: Write>(table: &salescope_core::TransactionTable, writer: &mut W) -> Result<()> {
    let dated = table.iter().filter(|r| r.date.is_some()).count();
    let priced = table.iter().filter(|r| r.amount.is_some()).count();
    writeln!(writer, "rows:             {}", table.len())?;
    writeln!(writer, "rows with date:   {dated}")?;
    writeln!(writer, "rows with amount: {priced}")?;
    Ok(())
}
