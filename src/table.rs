//! Fixed-width table rendering for scan results.

use archiver_core::settings::ViewSettings;
use archiver_core::{ColumnKind, FileRecord};
use std::io::{self, Write};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn cell(record: &FileRecord, column: ColumnKind) -> String {
    match column {
        ColumnKind::Name => record.name().to_string(),
        ColumnKind::Extension => record.extension().to_string(),
        ColumnKind::Size => record.size_display().to_string(),
        ColumnKind::DateModified => record.modified().format(DATE_FORMAT).to_string(),
        ColumnKind::DateAccessed => record.accessed().format(DATE_FORMAT).to_string(),
        ColumnKind::DateCreated => record.created().format(DATE_FORMAT).to_string(),
        ColumnKind::Path => record.parent_path().to_string(),
    }
}

/// Pad or cut `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}

fn write_row<W: Write>(
    out: &mut W,
    settings: &ViewSettings,
    mut text: impl FnMut(ColumnKind) -> String,
) -> io::Result<()> {
    let cells: Vec<String> = ColumnKind::ALL
        .iter()
        .map(|&column| fit(&text(column), settings.width(column) as usize))
        .collect();
    writeln!(out, "{}", cells.join("  ").trim_end())
}

/// Print the header, one line per record, and a file count.
pub fn render<W: Write>(
    out: &mut W,
    records: &[FileRecord],
    settings: &ViewSettings,
) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No matching files.");
    }

    write_row(out, settings, |column| column.label().to_string())?;
    for record in records {
        write_row(out, settings, |column| cell(record, column))?;
    }
    writeln!(out)?;
    writeln!(out, "File count: {}", records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn empty_list_prints_placeholder() {
        let mut out = Vec::new();
        render(&mut out, &[], &ViewSettings::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No matching files.\n");
    }

    #[test]
    fn rows_follow_header_and_count() {
        let t = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let records = vec![
            FileRecord::new("a.txt", 500, t, t, t, "/data"),
            FileRecord::new("b.bin", 2048, t, t, t, "/data"),
        ];
        let mut out = Vec::new();
        render(&mut out, &records, &ViewSettings::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("File"));
        assert!(lines[1].starts_with("a.txt"));
        assert!(lines[1].contains("1 KB"));
        assert!(lines[2].contains("2 KB"));
        assert_eq!(lines.last(), Some(&"File count: 2"));
    }
}
