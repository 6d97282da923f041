/// Input rows for the aggregation pass.
///
/// A `FileRecord` is one entry from a media index; a `VolumeReading` is one
/// mount point's capacity figures. Both are transient: read once per pass,
/// never retained by the engine.
use compact_str::CompactString;
use serde::Serialize;
use std::path::PathBuf;

/// One file entry reported by a media index.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Logical size in bytes.
    pub size: u64,

    /// Mime type as reported by the index ("type/subtype"), if any.
    /// Stored as reported; the classifier lowercases before matching.
    /// `CompactString` keeps common mime types inline (≤ 24 bytes).
    pub mime_type: Option<CompactString>,

    /// Full path of the entry. Consulted only by the directory probe.
    pub path: PathBuf,
}

impl FileRecord {
    /// Create a record with a known mime type.
    pub fn with_mime(path: impl Into<PathBuf>, size: u64, mime_type: &str) -> Self {
        Self {
            size,
            mime_type: Some(CompactString::new(mime_type)),
            path: path.into(),
        }
    }

    /// Create a record the index could not type.
    pub fn untyped(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            size,
            mime_type: None,
            path: path.into(),
        }
    }
}

/// One mount point's capacity reading from a volume statistics source.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VolumeReading {
    /// `true` for the OS-designated main/internal storage volume.
    pub is_primary: bool,
    /// Total capacity in bytes.
    pub total_bytes: u64,
    /// Free space in bytes.
    pub free_bytes: u64,
}
