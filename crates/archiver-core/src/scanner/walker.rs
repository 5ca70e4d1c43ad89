/// Synchronous directory walker built on `jwalk` in serial mode.
///
/// Entries are produced lazily, depth-first, with each directory's children
/// sorted by name. The age filter is applied to each file as it is reached,
/// so rejected files are never collected. Entries that cannot be read are
/// logged and skipped; only an unusable root fails the walk.
use crate::filter::FilterConfig;
use crate::model::FileRecord;
use crate::scanner::error::{AccessError, ScanError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Upper bound on the skipped-entry details kept by one walk.
///
/// The count in [`FileWalk::error_count`] keeps growing past this limit;
/// only the per-entry details are dropped.
pub const MAX_RECORDED_ERRORS: usize = 1_000;

/// Outcome of visiting one non-directory entry.
#[derive(Debug)]
pub enum WalkStep {
    /// A regular file that passed the filter.
    Matched(FileRecord),
    /// A file (or other non-directory entry) that was not kept.
    Rejected(PathBuf),
    /// An entry that could not be read.
    Skipped(AccessError),
}

/// Lazy sequence of matching [`FileRecord`]s under one root.
pub struct FileWalk {
    entries: jwalk::DirEntryIter<((), ())>,
    filter: FilterConfig,
    root: PathBuf,
    entries_seen: u64,
    error_count: u64,
    access_errors: Vec<AccessError>,
}

/// Check that `root` is a readable directory and return its absolute form.
pub fn validate_root(root: &Path) -> Result<PathBuf, ScanError> {
    let absolute = std::path::absolute(root).map_err(|source| ScanError::Inaccessible {
        path: root.to_path_buf(),
        source,
    })?;

    let meta = match fs::metadata(&absolute) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ScanError::NotFound { path: absolute });
        }
        Err(source) => {
            return Err(ScanError::Inaccessible {
                path: absolute,
                source,
            });
        }
    };
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory { path: absolute });
    }

    // Existence is not enough: the listing itself must be permitted.
    if let Err(source) = fs::read_dir(&absolute) {
        return Err(ScanError::Inaccessible {
            path: absolute,
            source,
        });
    }
    Ok(absolute)
}

/// Start a lazy walk of `root`.
///
/// Fails only when the root itself is missing, not a directory, or not
/// readable. Subdirectories are visited only when `filter.recurse` is set.
pub fn walk(root: &Path, filter: &FilterConfig) -> Result<FileWalk, ScanError> {
    let root = validate_root(root)?;
    let max_depth = if filter.recurse { usize::MAX } else { 1 };

    let entries = jwalk::WalkDir::new(&root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .min_depth(1)
        .max_depth(max_depth)
        .parallelism(jwalk::Parallelism::Serial)
        .into_iter();

    debug!(
        "Walking {} (recurse: {}, filter enabled: {})",
        root.display(),
        filter.recurse,
        filter.enabled
    );

    Ok(FileWalk {
        entries,
        filter: *filter,
        root,
        entries_seen: 0,
        error_count: 0,
        access_errors: Vec::new(),
    })
}

impl FileWalk {
    /// Absolute root being walked.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Non-directory entries visited so far.
    pub fn entries_seen(&self) -> u64 {
        self.entries_seen
    }

    /// Entries skipped because they could not be read.
    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// Details of skipped entries, capped at [`MAX_RECORDED_ERRORS`].
    pub fn access_errors(&self) -> &[AccessError] {
        &self.access_errors
    }

    /// Advance to the next non-directory entry.
    ///
    /// Returns `None` once the walk is exhausted.
    pub fn step(&mut self) -> Option<WalkStep> {
        // `while let` rather than `for`: `skip` needs `&mut self` mid-loop.
        while let Some(entry_result) = self.entries.next() {
            let mut entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    return Some(self.skip(path, err.to_string()));
                }
            };

            if entry.file_type().is_dir() {
                // jwalk yields an unreadable directory as a normal entry and
                // attaches the listing failure to it.
                if let Some(err) = entry.read_children_error.take() {
                    return Some(self.skip(entry.path(), err.to_string()));
                }
                continue;
            }

            let path = entry.path();
            self.entries_seen += 1;

            // Follow symlinks so a link to a file is listed like the file.
            let meta = match fs::metadata(&path) {
                Ok(meta) => meta,
                Err(err) => return Some(self.skip(path, err.to_string())),
            };
            if !meta.is_file() {
                return Some(WalkStep::Rejected(path));
            }

            let Some(record) = FileRecord::from_metadata(&path, &meta) else {
                return Some(self.skip(path, "timestamps unavailable".to_string()));
            };

            return Some(if self.filter.passes(&record) {
                WalkStep::Matched(record)
            } else {
                WalkStep::Rejected(path)
            });
        }
        None
    }

    fn skip(&mut self, path: PathBuf, message: String) -> WalkStep {
        warn!("Skipping {}: {}", path.display(), message);
        self.error_count += 1;
        let error = AccessError { path, message };
        if self.access_errors.len() < MAX_RECORDED_ERRORS {
            self.access_errors.push(error.clone());
        }
        WalkStep::Skipped(error)
    }
}

impl Iterator for FileWalk {
    type Item = FileRecord;

    fn next(&mut self) -> Option<FileRecord> {
        while let Some(step) = self.step() {
            if let WalkStep::Matched(record) = step {
                return Some(record);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn validate_root_rejects_missing_folder() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(
            validate_root(&missing),
            Err(ScanError::NotFound { .. })
        ));
    }

    #[test]
    fn validate_root_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            validate_root(&file),
            Err(ScanError::NotADirectory { .. })
        ));
    }

    #[test]
    fn validate_root_returns_absolute_path() {
        let tmp = TempDir::new().unwrap();
        let root = validate_root(tmp.path()).unwrap();
        assert!(root.is_absolute());
    }

    #[test]
    fn walk_is_sorted_and_lazy() {
        let tmp = TempDir::new().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(tmp.path().join(name), b"data").unwrap();
        }

        let mut walk = walk(tmp.path(), &FilterConfig::disabled()).unwrap();
        let first = walk.next().unwrap();
        assert_eq!(first.name(), "a.txt");
        assert_eq!(walk.entries_seen(), 1, "only one entry consumed so far");

        let rest: Vec<String> = walk.map(|r| r.name().to_string()).collect();
        assert_eq!(rest, ["b.txt", "c.txt"]);
    }

    #[test]
    fn directories_never_produce_records() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("inner.txt"), b"x").unwrap();

        let cfg = FilterConfig::disabled().with_recurse(true);
        let names: Vec<String> = walk(tmp.path(), &cfg)
            .unwrap()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, ["inner.txt"]);
    }
}
