/// Scanner module — walks a folder and produces filtered file records.
///
/// Two entry points share the same walker:
/// - [`scan`] / [`walk`]: synchronous, on the calling thread. `walk` is lazy.
/// - [`start_scan`]: the same walk on a background thread, with progress
///   messages and cooperative cancellation, writing matches into a shared
///   [`LiveList`] so a UI can show rows while the scan runs.
pub mod background;
pub mod error;
pub mod progress;
pub mod walker;

pub use error::{AccessError, ScanError};
pub use walker::{validate_root, walk, FileWalk, WalkStep};

use crate::filter::FilterConfig;
use crate::model::FileRecord;
use progress::ScanProgress;

use crossbeam_channel::Receiver;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::info;

/// Scan `root` and collect every file that passes `filter`.
///
/// Unreadable entries are logged and skipped. Fails only when `root` is
/// missing, not a directory, or not readable.
pub fn scan(root: &Path, filter: &FilterConfig) -> Result<Vec<FileRecord>, ScanError> {
    let start = Instant::now();
    let mut walk = walk(root, filter)?;
    let records: Vec<FileRecord> = walk.by_ref().collect();

    info!(
        "Scanned {}: {} of {} files kept, {} skipped in {:?}",
        walk.root().display(),
        records.len(),
        walk.entries_seen(),
        walk.error_count(),
        start.elapsed()
    );
    Ok(records)
}

/// A shared, concurrently-readable list of matching records.
///
/// The scanner holds a write lock briefly when appending a batch.
/// Readers take a read lock to render the rows found so far.
pub type LiveList = Arc<RwLock<Vec<FileRecord>>>;

/// Maximum number of progress messages that may queue up in the channel.
///
/// If the reader falls behind, further `Update` and `Error` messages are
/// dropped rather than queued on the heap or blocking the scan.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Handle to a running or completed background scan.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Matching records, appended in batches while the scan runs.
    pub live_list: LiveList,
    cancel_flag: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// Block until the scan thread exits and take the collected records.
    ///
    /// Pending progress messages are discarded.
    pub fn wait(mut self) -> Vec<FileRecord> {
        // Disconnect so a terminal send on a full channel returns at once.
        drop(std::mem::replace(
            &mut self.progress_rx,
            crossbeam_channel::never(),
        ));
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
        std::mem::take(&mut *self.live_list.write())
    }
}

/// Start a scan of `root` on a background thread.
///
/// The root is validated before the thread starts, so a missing or
/// unreadable folder is reported here rather than over the channel.
pub fn start_scan(root: &Path, filter: FilterConfig) -> Result<ScanHandle, ScanError> {
    let root = validate_root(root)?;

    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let live_list: LiveList = Arc::new(RwLock::new(Vec::new()));

    let cancel_clone = cancel_flag.clone();
    let list_clone = live_list.clone();

    let thread = thread::Builder::new()
        .name("archiver-scanner".into())
        .spawn(move || {
            info!("Starting background scan of {}", root.display());
            background::run_scan(&root, &filter, progress_tx, cancel_clone, list_clone);
        })
        .map_err(ScanError::Spawn)?;

    Ok(ScanHandle {
        progress_rx,
        live_list,
        cancel_flag,
        thread: Some(thread),
    })
}
