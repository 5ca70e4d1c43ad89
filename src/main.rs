//! Archiver — find files under a folder by age and list them in a table.
//!
//! Thin binary entry point. Scanning, filtering and sorting live in the
//! `archiver-core` crate; this file only wires flags to it and prints.

mod cli;
mod table;

use anyhow::Context;
use archiver_core::export;
use archiver_core::settings::ViewSettings;
use archiver_core::{scan, Comparator, SortOrder};
use clap::Parser;
use cli::{Cli, ExportFormat};
use std::fs::File;
use std::io::{self, BufWriter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the table on stdout stays clean.
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    tracing::info!("Archiver starting");

    let filter = cli.filter()?;
    let settings = match &cli.settings {
        Some(path) => ViewSettings::load(path)?,
        None => ViewSettings::default(),
    };

    let mut records = scan(&cli.folder, &filter)
        .with_context(|| format!("scan of {} failed", cli.folder.display()))?;

    if let Some(column) = cli.sort {
        let order = if cli.descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        Comparator::new(column, order)
            .with_policy(cli.policy())
            .sort(&mut records);
    }

    let stdout = io::stdout();
    table::render(&mut stdout.lock(), &records, &settings)?;

    if let Some(path) = &cli.export {
        let file = File::create(path)
            .with_context(|| format!("cannot create export file {}", path.display()))?;
        let writer = BufWriter::new(file);
        match cli.format {
            ExportFormat::Csv => export::write_csv(&records, writer)?,
            ExportFormat::Json => export::write_json(&records, writer)?,
        }
        tracing::info!("Exported {} records to {}", records.len(), path.display());
    }

    Ok(())
}
