/// Data model for Archiver scan results.
///
/// Re-exports the immutable per-file record and the size formatting helpers.
pub mod record;
pub mod size;

pub use record::FileRecord;
pub use size::{format_bytes, format_size, magnitude, MAGNITUDE_SENTINEL};
