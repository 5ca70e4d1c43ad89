/// Export a result list as CSV or JSON.
///
/// Both formats carry one row per record with the column labels as field
/// names. Timestamps are written in RFC 3339.
use crate::model::FileRecord;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat view of a record for serialization.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "File")]
    name: &'a str,
    #[serde(rename = "Extension")]
    extension: &'a str,
    #[serde(rename = "Size")]
    size_display: &'a str,
    #[serde(rename = "Bytes")]
    size_bytes: u64,
    #[serde(rename = "Date Modified")]
    modified: String,
    #[serde(rename = "Date Accessed")]
    accessed: String,
    #[serde(rename = "Date Created")]
    created: String,
    #[serde(rename = "Path")]
    path: &'a str,
}

impl<'a> From<&'a FileRecord> for ExportRow<'a> {
    fn from(r: &'a FileRecord) -> Self {
        Self {
            name: r.name(),
            extension: r.extension(),
            size_display: r.size_display(),
            size_bytes: r.size_bytes(),
            modified: r.modified().to_rfc3339(),
            accessed: r.accessed().to_rfc3339(),
            created: r.created().to_rfc3339(),
            path: r.parent_path(),
        }
    }
}

/// Write `records` as CSV with a header row.
pub fn write_csv<W: Write>(records: &[FileRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(ExportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `records` as a pretty-printed JSON array.
pub fn write_json<W: Write>(records: &[FileRecord], mut writer: W) -> Result<(), ExportError> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(ExportRow::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn sample() -> Vec<FileRecord> {
        let t = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        vec![
            FileRecord::new("a.txt", 500, t, t, t, "/data"),
            FileRecord::new("b, c.bin", 10_485_760, t, t, t, "/data/sub"),
        ]
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let mut out = Vec::new();
        write_csv(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "File,Extension,Size,Bytes,Date Modified,Date Accessed,Date Created,Path"
        );
        assert!(lines[1].starts_with("a.txt,.txt,1 KB,500,"));
        // Names containing commas are quoted.
        assert!(lines[2].starts_with("\"b, c.bin\",.bin,10 MB,10485760,"));
    }

    #[test]
    fn json_is_an_array_of_rows() {
        let mut out = Vec::new();
        write_json(&sample(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["File"], "a.txt");
        assert_eq!(rows[1]["Size"], "10 MB");
        assert_eq!(rows[1]["Path"], "/data/sub");
    }

    #[test]
    fn empty_list_exports_cleanly() {
        let mut out = Vec::new();
        write_json(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
