/// Background scan body — runs the serial walker on the scan thread.
///
/// # Lock-contention mitigation
///
/// Matches are accumulated in a local `Vec` and appended to the shared
/// `LiveList` under a single write lock per batch, instead of one lock per
/// record. Readers therefore see rows arrive in chunks of [`BATCH_SIZE`]
/// (or at every progress update, whichever comes first).
use crate::filter::FilterConfig;
use crate::model::FileRecord;
use crate::scanner::progress::ScanProgress;
use crate::scanner::walker::{walk, WalkStep};
use crate::scanner::LiveList;
use crossbeam_channel::Sender;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Number of matches to buffer locally before flushing to the `LiveList`.
const BATCH_SIZE: usize = 500;

/// Entries between progress updates.
const UPDATE_INTERVAL: u64 = 1_000;

/// Append `pending` to the shared list under one write lock.
#[inline]
fn flush_pending(live_list: &LiveList, pending: &mut Vec<FileRecord>) {
    if pending.is_empty() {
        return;
    }
    live_list.write().append(pending);
}

/// Walk `root` and stream matches into `live_list`.
///
/// `Update` and `Error` messages are dropped when the channel is full, so a
/// slow or absent reader never stalls the walk. Always finishes by sending
/// either `Complete` or `Cancelled`.
pub fn run_scan(
    root: &Path,
    filter: &FilterConfig,
    progress_tx: Sender<ScanProgress>,
    cancel_flag: Arc<AtomicBool>,
    live_list: LiveList,
) {
    let start = Instant::now();

    let mut walk = match walk(root, filter) {
        Ok(walk) => walk,
        Err(err) => {
            // The root was valid when the scan was requested but has since
            // gone away; report it and finish with nothing.
            warn!("Background scan could not start: {err}");
            let _ = progress_tx.send(ScanProgress::Error {
                path: root.to_string_lossy().into_owned(),
                message: err.to_string(),
            });
            let _ = progress_tx.send(ScanProgress::Complete {
                duration: start.elapsed(),
                matched: 0,
                error_count: 1,
            });
            return;
        }
    };

    let mut pending: Vec<FileRecord> = Vec::with_capacity(BATCH_SIZE);
    let mut matched: u64 = 0;
    let mut steps: u64 = 0;

    loop {
        if cancel_flag.load(Ordering::Relaxed) {
            flush_pending(&live_list, &mut pending);
            debug!("Scan cancelled after {steps} entries");
            let _ = progress_tx.send(ScanProgress::Cancelled);
            return;
        }
        let Some(step) = walk.step() else {
            break;
        };
        steps += 1;

        let current_path = match step {
            WalkStep::Matched(record) => {
                matched += 1;
                let path = record.full_path().to_path_buf();
                pending.push(record);
                if pending.len() >= BATCH_SIZE {
                    flush_pending(&live_list, &mut pending);
                }
                path
            }
            WalkStep::Rejected(path) => path,
            WalkStep::Skipped(error) => {
                let _ = progress_tx.try_send(ScanProgress::Error {
                    path: error.path.to_string_lossy().into_owned(),
                    message: error.message.clone(),
                });
                error.path
            }
        };

        if steps.is_multiple_of(UPDATE_INTERVAL) {
            flush_pending(&live_list, &mut pending);
            let _ = progress_tx.try_send(ScanProgress::Update {
                entries_seen: walk.entries_seen(),
                files_matched: matched,
                current_path: current_path.to_string_lossy().into_owned(),
            });
        }
    }

    flush_pending(&live_list, &mut pending);

    let duration = start.elapsed();
    debug!(
        "Background scan complete: {} of {} files kept in {:?}",
        matched,
        walk.entries_seen(),
        duration
    );
    let _ = progress_tx.send(ScanProgress::Complete {
        duration,
        matched,
        error_count: walk.error_count(),
    });
}
