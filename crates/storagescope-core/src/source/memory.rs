/// In-memory media index — for embedders that already hold rows, and for
/// tests that need precise control over failure modes.
use super::{MediaIndex, RecordError, Records, SourceError};
use crate::model::FileRecord;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A media index backed by a plain vector of rows.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    rows: Vec<Result<FileRecord, RecordError>>,
    directories: HashSet<PathBuf>,
    unavailable: Option<String>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a readable row.
    pub fn with_record(mut self, record: FileRecord) -> Self {
        self.rows.push(Ok(record));
        self
    }

    /// Append a row that fails to read when the stream reaches it.
    pub fn with_broken_row(mut self, reason: &str) -> Self {
        self.rows.push(Err(RecordError::new(reason)));
        self
    }

    /// Mark `path` as a directory for the probe.
    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directories.insert(path.into());
        self
    }

    /// Make the whole index fail to open.
    pub fn with_unavailable(mut self, reason: &str) -> Self {
        self.unavailable = Some(reason.to_owned());
        self
    }
}

impl MediaIndex for MemoryIndex {
    fn records(&self) -> Result<Records<'_>, SourceError> {
        if let Some(reason) = &self.unavailable {
            return Err(SourceError::Unavailable(reason.clone()));
        }
        Ok(Box::new(self.rows.iter().cloned()))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }
}
