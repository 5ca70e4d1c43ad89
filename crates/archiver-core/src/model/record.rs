/// A metadata snapshot of one scanned file.
///
/// Records are built once per file during a scan and never mutated
/// afterwards: every field is private and only exposed through accessors.
/// The owning list may reorder or drop records but cannot edit them.
use super::size::format_bytes;
use chrono::{DateTime, Local};
use compact_str::CompactString;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// One row of the result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// File name only (no directory component).
    name: CompactString,
    /// Extension including the leading dot, or empty.
    extension: CompactString,
    /// Logical size in bytes.
    size_bytes: u64,
    /// Scaled display string, always `format_bytes(size_bytes)`.
    size_display: CompactString,
    modified: DateTime<Local>,
    accessed: DateTime<Local>,
    created: DateTime<Local>,
    /// Absolute directory containing the file.
    parent_path: String,
    /// On-disk path. Differs from `parent_path` + `name` only when the
    /// path is not valid UTF-8 and the display strings were made lossy.
    path: PathBuf,
}

impl FileRecord {
    /// Build a record from already-known values.
    ///
    /// The extension and size display are derived here so they can never
    /// disagree with `name` and `size_bytes`.
    pub fn new(
        name: &str,
        size_bytes: u64,
        modified: DateTime<Local>,
        accessed: DateTime<Local>,
        created: DateTime<Local>,
        parent_path: impl Into<String>,
    ) -> Self {
        let parent_path = parent_path.into();
        let path = Path::new(&parent_path).join(name);
        Self {
            name: CompactString::new(name),
            extension: CompactString::new(extension_of(name)),
            size_bytes,
            size_display: CompactString::new(format_bytes(size_bytes)),
            modified,
            accessed,
            created,
            parent_path,
            path,
        }
    }

    /// Build a record for the file at `path` from its (link-followed) metadata.
    ///
    /// `path` is expected to be absolute. Returns `None` when the metadata
    /// lacks a modification or access time, which callers treat as an
    /// unreadable entry. Filesystems without a birth time report the
    /// modification time as the creation time.
    pub fn from_metadata(path: &Path, meta: &Metadata) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();
        let parent = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let modified: DateTime<Local> = meta.modified().ok()?.into();
        let accessed: DateTime<Local> = meta.accessed().ok()?.into();
        let created: DateTime<Local> = meta.created().map(Into::into).unwrap_or(modified);

        let mut record = Self::new(&name, meta.len(), modified, accessed, created, parent);
        record.path = path.to_path_buf();
        Some(record)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[inline]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Human-scaled size, e.g. `"4 MB"`.
    #[inline]
    pub fn size_display(&self) -> &str {
        &self.size_display
    }

    #[inline]
    pub fn modified(&self) -> DateTime<Local> {
        self.modified
    }

    #[inline]
    pub fn accessed(&self) -> DateTime<Local> {
        self.accessed
    }

    #[inline]
    pub fn created(&self) -> DateTime<Local> {
        self.created
    }

    /// Directory containing the file.
    #[inline]
    pub fn parent_path(&self) -> &str {
        &self.parent_path
    }

    /// Full path of the file as it exists on disk.
    #[inline]
    pub fn full_path(&self) -> &Path {
        &self.path
    }
}

/// Extension of a file name: everything from the last `.` onwards.
///
/// Names without a dot, or ending in one, have no extension. A leading
/// dot counts, so `.bashrc` is its own extension.
fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_extension_rules() {
        assert_eq!(extension_of("report.pdf"), ".pdf");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of(".bashrc"), ".bashrc");
    }

    #[test]
    fn test_size_display_derived_from_bytes() {
        let a = FileRecord::new("a.bin", 10_485_760, at(0), at(0), at(0), "/data");
        let b = FileRecord::new("b.bin", 10_485_760, at(5), at(6), at(7), "/other");
        assert_eq!(a.size_display(), "10 MB");
        assert_eq!(a.size_display(), b.size_display());
    }

    #[test]
    fn test_full_path_joins_parent_and_name() {
        let r = FileRecord::new("notes.txt", 12, at(0), at(0), at(0), "/home/user");
        assert_eq!(r.full_path(), Path::new("/home/user/notes.txt"));
        assert_eq!(r.extension(), ".txt");
    }

    #[test]
    fn test_from_metadata_reads_real_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("data.csv");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();
        let meta = std::fs::metadata(&path).unwrap();

        let r = FileRecord::from_metadata(&path, &meta).unwrap();
        assert_eq!(r.name(), "data.csv");
        assert_eq!(r.extension(), ".csv");
        assert_eq!(r.size_bytes(), 2048);
        assert_eq!(r.size_display(), "2 KB");
        assert_eq!(Path::new(r.parent_path()), tmp.path());
        assert_eq!(r.full_path(), path);
    }

    #[cfg(unix)]
    #[test]
    fn test_full_path_keeps_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(OsStr::from_bytes(b"caf\xe9.txt"));
        if std::fs::write(&path, b"x").is_err() {
            // Some filesystems refuse non-UTF-8 names.
            return;
        }
        let meta = std::fs::metadata(&path).unwrap();

        let r = FileRecord::from_metadata(&path, &meta).unwrap();
        assert_eq!(r.name(), "caf\u{fffd}.txt");
        assert_eq!(r.extension(), ".txt");
        assert_eq!(r.full_path(), path);
        assert!(r.full_path().exists());
    }
}
