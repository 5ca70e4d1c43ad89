//! Command-line arguments for the terminal front end.

use anyhow::{bail, Context};
use archiver_core::sort::{PathOrdering, SizeOrdering};
use archiver_core::{ColumnKind, DateField, FilterConfig, SortPolicy};
use chrono::{DateTime, Local, NaiveDate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "archiver", version, about = "List files under a folder, filtered by age")]
pub struct Cli {
    /// Folder to scan
    pub folder: PathBuf,

    /// Include subdirectories
    #[arg(short, long)]
    pub recurse: bool,

    /// Keep files modified before DATE (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_name = "DATE", conflicts_with = "newer_than")]
    pub older_than: Option<String>,

    /// Keep files modified after DATE (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_name = "DATE")]
    pub newer_than: Option<String>,

    /// Timestamp the age filter compares
    #[arg(long, value_enum, default_value_t = FilterField::Modified)]
    pub field: FilterField,

    /// Column to sort by (name, extension, size, modified, accessed, created, path)
    #[arg(short, long, value_name = "COLUMN")]
    pub sort: Option<ColumnKind>,

    /// Sort descending instead of ascending
    #[arg(short, long)]
    pub descending: bool,

    /// Sort sizes by exact byte count instead of the displayed value
    #[arg(long)]
    pub byte_sizes: bool,

    /// Sort paths by their full text instead of leading separator count
    #[arg(long)]
    pub lexical_paths: bool,

    /// Column width settings file (JSON)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Write the result list to FILE
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Format for --export
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterField {
    Modified,
    Accessed,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl Cli {
    /// Build the scan filter from the age and recursion flags.
    pub fn filter(&self) -> anyhow::Result<FilterConfig> {
        let base = match (&self.older_than, &self.newer_than) {
            (Some(date), None) => FilterConfig::older_than(parse_date(date)?),
            (None, Some(date)) => FilterConfig::newer_than(parse_date(date)?),
            (None, None) => FilterConfig::disabled(),
            (Some(_), Some(_)) => bail!("--older-than and --newer-than are mutually exclusive"),
        };
        let field = match self.field {
            FilterField::Modified => DateField::Modified,
            FilterField::Accessed => DateField::Accessed,
            FilterField::Created => DateField::Created,
        };
        Ok(base.with_recurse(self.recurse).with_field(field))
    }

    pub fn policy(&self) -> SortPolicy {
        SortPolicy {
            size: if self.byte_sizes {
                SizeOrdering::Bytes
            } else {
                SizeOrdering::Display
            },
            path: if self.lexical_paths {
                PathOrdering::Lexicographic
            } else {
                PathOrdering::LeadingSeparators
            },
        }
    }
}

/// Parse `YYYY-MM-DD` as local midnight, or a full RFC 3339 timestamp.
fn parse_date(text: &str) -> anyhow::Result<DateTime<Local>> {
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return archiver_core::filter::local_start_of_day(day)
            .with_context(|| format!("no local midnight on {day}"));
    }
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Local))
        .with_context(|| format!("invalid date '{text}' (expected YYYY-MM-DD or RFC 3339)"))
}
