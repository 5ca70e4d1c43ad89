/// Scan failures.
///
/// [`ScanError`] is fatal to a scan call and carries no partial result.
/// [`AccessError`] describes one entry that was skipped while the scan
/// carried on.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("folder not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("not a folder: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read folder {}: {source}", .path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start scanner thread: {0}")]
    Spawn(#[source] io::Error),
}

/// A file or directory that could not be read or stat'ed during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError {
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
