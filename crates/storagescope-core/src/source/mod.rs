/// Record sources — the media-index seam the aggregation pass reads from.
///
/// The engine never talks to a platform media store directly; it consumes
/// anything implementing [`MediaIndex`]. Two implementations ship here: an
/// in-memory index for embedders and tests, and a filesystem walker.
pub mod fs;
pub mod memory;

pub use fs::{mime_for_extension, FsMediaIndex};
pub use memory::MemoryIndex;

use crate::model::FileRecord;
use std::path::Path;
use thiserror::Error;

/// A single row that could not be read from the index.
///
/// Cloneable so sources can replay a recorded failure; the pass skips the
/// row, counts it, and moves on.
#[derive(Debug, Clone, Error)]
#[error("unreadable record: {reason}")]
pub struct RecordError {
    reason: String,
}

impl RecordError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The index itself could not be opened or iterated.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("media index unavailable: {0}")]
    Unavailable(String),
    #[error("media index I/O failure")]
    Io(#[from] std::io::Error),
}

/// Stream of fallible rows from a media index.
pub type Records<'a> = Box<dyn Iterator<Item = Result<FileRecord, RecordError>> + 'a>;

/// An opaque source of file records.
///
/// Implementations may be partially unavailable: individual rows fail with
/// [`RecordError`] while the stream keeps going, and a source that cannot
/// be iterated at all fails up front with [`SourceError`]. Handles must not
/// be iterated from two threads concurrently; the overview worker consumes
/// the stream on its own thread only.
pub trait MediaIndex {
    /// Open the record stream.
    fn records(&self) -> Result<Records<'_>, SourceError>;

    /// Whether `path` resolves to a directory. Consulted only for rows the
    /// index could not type.
    fn is_dir(&self, path: &Path) -> bool;
}
