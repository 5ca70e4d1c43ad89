/// Scan progress reporting — lightweight messages sent from the scan
/// thread to the caller via a crossbeam channel.
use std::time::Duration;

/// Progress updates sent from the scan thread.
///
/// Matching records are in the shared `LiveList`; these messages carry
/// only counters and status.
#[derive(Debug)]
pub enum ScanProgress {
    /// Periodic update with running totals.
    Update {
        entries_seen: u64,
        files_matched: u64,
        current_path: String,
    },
    /// A non-fatal error (e.g. permission denied on one file).
    Error { path: String, message: String },
    /// Scanning completed. Every match is already in the `LiveList`.
    Complete {
        duration: Duration,
        matched: u64,
        error_count: u64,
    },
    /// Scan was cancelled; the `LiveList` holds the matches found so far.
    Cancelled,
}
