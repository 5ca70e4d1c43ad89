/// Archiver Core — file scanning, age filtering, and sorting.
///
/// This crate contains all business logic with zero UI dependencies.
/// A presentation layer hands it a folder and a [`FilterConfig`], gets back
/// a list of [`FileRecord`]s, and asks it to reorder that list by column.
///
/// # Modules
///
/// - [`model`] — Immutable file records and size formatting.
/// - [`filter`] — The age/recursion filter applied during a scan.
/// - [`scanner`] — Synchronous and background directory walking.
/// - [`sort`] — Column comparators and header-click sort state.
/// - [`settings`] — Injected, file-backed column width settings.
/// - [`export`] — CSV and JSON output of a result list.
pub mod export;
pub mod filter;
pub mod model;
pub mod scanner;
pub mod settings;
pub mod sort;

pub use filter::{DateField, FilterConfig, Period};
pub use model::{format_size, FileRecord};
pub use scanner::{scan, start_scan, ScanError};
pub use sort::{sort, ColumnKind, Comparator, SortOrder, SortPolicy, SortState};
