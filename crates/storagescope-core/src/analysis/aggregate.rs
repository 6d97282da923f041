/// The classify-and-sum pass — buckets media-index rows into the six
/// categories and sums their sizes.
///
/// Rows without a mime type go through an inclusion filter first: zero-byte
/// rows, rows of exactly the directory-entry size, and rows whose path is a
/// directory are excluded from every total. Individual unreadable rows are
/// skipped and counted; only a source that cannot be iterated at all fails
/// the pass.
use crate::analysis::categories::{classify_mime, CategoryTable, FileCategory};
use crate::model::FileRecord;
use crate::source::{MediaIndex, RecordError, SourceError};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Conventional on-disk size of a directory entry. Mime-less rows of
/// exactly this size are treated as directory placeholders and excluded.
pub const DIRECTORY_ENTRY_SIZE: u64 = 4096;

/// Size and count totals for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryUsage {
    pub category: FileCategory,
    pub total_size: u64,
    pub file_count: u64,
}

impl CategoryUsage {
    fn zero(category: FileCategory) -> Self {
        Self {
            category,
            total_size: 0,
            file_count: 0,
        }
    }
}

/// Per-category totals for one aggregation pass.
///
/// Always carries all six categories, sorted descending by total size so
/// the largest bucket comes first.
#[derive(Debug, Clone, Serialize)]
pub struct UsageBreakdown {
    categories: Vec<CategoryUsage>,
    /// Rows that failed to read and were dropped from every total.
    pub skipped_records: u64,
}

impl UsageBreakdown {
    /// A breakdown with every category at zero.
    pub fn empty() -> Self {
        Self {
            categories: FileCategory::ALL.iter().map(|&c| CategoryUsage::zero(c)).collect(),
            skipped_records: 0,
        }
    }

    fn from_map(map: &HashMap<FileCategory, CategoryUsage>, skipped_records: u64) -> Self {
        let mut categories: Vec<CategoryUsage> = FileCategory::ALL
            .iter()
            .map(|&c| map.get(&c).cloned().unwrap_or_else(|| CategoryUsage::zero(c)))
            .collect();
        // Stable sort: ties keep display order.
        categories.sort_by(|a, b| b.total_size.cmp(&a.total_size));
        Self {
            categories,
            skipped_records,
        }
    }

    /// All six categories, descending by total size.
    pub fn categories(&self) -> &[CategoryUsage] {
        &self.categories
    }

    /// Total bytes classified into `category`.
    pub fn bytes(&self, category: FileCategory) -> u64 {
        self.categories
            .iter()
            .find(|u| u.category == category)
            .map_or(0, |u| u.total_size)
    }

    /// Number of rows classified into `category`.
    pub fn files(&self, category: FileCategory) -> u64 {
        self.categories
            .iter()
            .find(|u| u.category == category)
            .map_or(0, |u| u.file_count)
    }

    /// Sum of bytes across all six categories.
    pub fn classified_bytes(&self) -> u64 {
        self.categories.iter().map(|u| u.total_size).sum()
    }
}

impl Default for UsageBreakdown {
    fn default() -> Self {
        Self::empty()
    }
}

/// Decide the category for a single record, or `None` when the record is
/// excluded from the totals.
///
/// `is_dir` is consulted lazily — only for mime-less rows that pass both
/// size checks — so callers may hand in an expensive probe.
pub fn classify_record(
    record: &FileRecord,
    table: &CategoryTable,
    is_dir: impl FnOnce(&Path) -> bool,
) -> Option<FileCategory> {
    match record.mime_type.as_deref() {
        None => {
            if record.size > 0 && record.size != DIRECTORY_ENTRY_SIZE && !is_dir(&record.path) {
                Some(FileCategory::Other)
            } else {
                None
            }
        }
        Some(mime) => Some(classify_mime(mime, table)),
    }
}

/// Running totals for an in-progress pass.
///
/// [`classify_and_sum`] drives one of these to completion; the overview
/// worker drives its own so it can flush snapshots into the live view
/// between batches.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    by_category: HashMap<FileCategory, CategoryUsage>,
    skipped_records: u64,
    records_seen: u64,
    classified_bytes: u64,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self {
            // Exactly six categories — pre-size to avoid rehashing.
            by_category: HashMap::with_capacity(6),
            skipped_records: 0,
            records_seen: 0,
            classified_bytes: 0,
        }
    }

    /// Classify one record and fold it into the totals.
    pub fn add(
        &mut self,
        record: &FileRecord,
        table: &CategoryTable,
        is_dir: impl FnOnce(&Path) -> bool,
    ) {
        self.records_seen += 1;
        let Some(category) = classify_record(record, table, is_dir) else {
            return;
        };
        let entry = self
            .by_category
            .entry(category)
            .or_insert_with(|| CategoryUsage::zero(category));
        entry.total_size += record.size;
        entry.file_count += 1;
        self.classified_bytes += record.size;
    }

    /// Drop an unreadable row; the batch continues.
    pub fn add_error(&mut self, err: &RecordError) {
        debug!("skipping unreadable record: {err}");
        self.records_seen += 1;
        self.skipped_records += 1;
    }

    /// Rows consumed so far, including skipped and excluded ones.
    pub fn records_seen(&self) -> u64 {
        self.records_seen
    }

    /// Running sum of bytes classified so far.
    pub fn classified_bytes(&self) -> u64 {
        self.classified_bytes
    }

    /// Point-in-time breakdown of the totals so far.
    pub fn snapshot(&self) -> UsageBreakdown {
        UsageBreakdown::from_map(&self.by_category, self.skipped_records)
    }

    /// Consume the accumulator into its final breakdown.
    pub fn finish(self) -> UsageBreakdown {
        UsageBreakdown::from_map(&self.by_category, self.skipped_records)
    }
}

/// Classify every record in the index and sum sizes per category.
///
/// A single bad row never aborts the batch — it is skipped and counted in
/// [`UsageBreakdown::skipped_records`]. An index that cannot be iterated at
/// all is returned as an error; the overview pass degrades that to an
/// all-zero breakdown rather than surfacing it to the caller.
pub fn classify_and_sum<S: MediaIndex + ?Sized>(
    index: &S,
    table: &CategoryTable,
) -> Result<UsageBreakdown, SourceError> {
    let records = index.records()?;
    let mut acc = UsageAccumulator::new();
    for row in records {
        match row {
            Ok(record) => acc.add(&record, table, |p| index.is_dir(p)),
            Err(err) => acc.add_error(&err),
        }
    }
    Ok(acc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryIndex;

    fn run(index: &MemoryIndex) -> UsageBreakdown {
        classify_and_sum(index, &CategoryTable::default()).expect("index must be iterable")
    }

    /// A mixed batch: a jpeg, an mp4, a mime-less file, and a mime-less
    /// row at the directory-entry size.
    #[test]
    fn mixed_batch_buckets_by_category() {
        let index = MemoryIndex::new()
            .with_record(FileRecord::with_mime("/sdcard/a.jpg", 1_000, "image/jpeg"))
            .with_record(FileRecord::with_mime("/sdcard/b.mp4", 2_000, "video/mp4"))
            .with_record(FileRecord::untyped("/sdcard/foo", 500))
            .with_record(FileRecord::untyped("/sdcard/bar", 4_096));

        let breakdown = run(&index);
        assert_eq!(breakdown.bytes(FileCategory::Images), 1_000);
        assert_eq!(breakdown.bytes(FileCategory::Videos), 2_000);
        assert_eq!(breakdown.bytes(FileCategory::Other), 500);
        assert_eq!(breakdown.bytes(FileCategory::Audio), 0);
        assert_eq!(breakdown.bytes(FileCategory::Documents), 0);
        assert_eq!(breakdown.bytes(FileCategory::Archives), 0);
        assert_eq!(breakdown.classified_bytes(), 3_500);
    }

    /// Sum of the per-category totals must equal the byte total of the
    /// rows that passed the inclusion filter.
    #[test]
    fn category_sum_matches_included_bytes() {
        let index = MemoryIndex::new()
            .with_record(FileRecord::with_mime("/a.png", 10, "image/png"))
            .with_record(FileRecord::with_mime("/b.zip", 20, "application/zip"))
            .with_record(FileRecord::with_mime("/c.pdf", 40, "application/pdf"))
            .with_record(FileRecord::untyped("/d", 80))
            // Excluded: zero-length and sentinel-size rows.
            .with_record(FileRecord::untyped("/e", 0))
            .with_record(FileRecord::untyped("/f", 4_096));

        let breakdown = run(&index);
        assert_eq!(breakdown.classified_bytes(), 150);
    }

    #[test]
    fn zero_size_untyped_row_is_excluded() {
        let index = MemoryIndex::new().with_record(FileRecord::untyped("/empty", 0));
        assert_eq!(run(&index).classified_bytes(), 0);
    }

    /// A mime-less row at exactly the sentinel size is excluded whether or
    /// not the path is a directory.
    #[test]
    fn sentinel_size_is_excluded_regardless_of_directory_status() {
        let as_file = MemoryIndex::new().with_record(FileRecord::untyped("/x", 4_096));
        assert_eq!(run(&as_file).classified_bytes(), 0);

        let as_dir = MemoryIndex::new()
            .with_record(FileRecord::untyped("/x", 4_096))
            .with_directory("/x");
        assert_eq!(run(&as_dir).classified_bytes(), 0);
    }

    /// Directories are excluded even when their size is not the sentinel.
    #[test]
    fn directory_with_unusual_size_is_excluded() {
        let index = MemoryIndex::new()
            .with_record(FileRecord::untyped("/bigdir", 8_192))
            .with_directory("/bigdir");
        assert_eq!(run(&index).classified_bytes(), 0);
    }

    /// Mime-typed rows never consult the directory probe.
    #[test]
    fn typed_rows_skip_the_directory_probe() {
        let record = FileRecord::with_mime("/a.png", 10, "image/png");
        let category = classify_record(&record, &CategoryTable::default(), |_| {
            panic!("probe must not run for typed rows")
        });
        assert_eq!(category, Some(FileCategory::Images));
    }

    /// An unreadable row is dropped and counted; the batch continues.
    #[test]
    fn per_record_errors_do_not_abort_the_batch() {
        let index = MemoryIndex::new()
            .with_record(FileRecord::with_mime("/a.png", 100, "image/png"))
            .with_broken_row("size column unreadable")
            .with_record(FileRecord::with_mime("/b.png", 200, "image/png"));

        let breakdown = run(&index);
        assert_eq!(breakdown.bytes(FileCategory::Images), 300);
        assert_eq!(breakdown.skipped_records, 1);
    }

    /// A source that cannot be iterated at all fails the operation.
    #[test]
    fn unavailable_source_returns_error() {
        let index = MemoryIndex::new()
            .with_record(FileRecord::with_mime("/a.png", 100, "image/png"))
            .with_unavailable("index rebuilding");

        let result = classify_and_sum(&index, &CategoryTable::default());
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }

    #[test]
    fn empty_breakdown_has_all_six_categories_at_zero() {
        let breakdown = UsageBreakdown::empty();
        assert_eq!(breakdown.categories().len(), 6);
        for category in FileCategory::ALL {
            assert_eq!(breakdown.bytes(category), 0);
            assert_eq!(breakdown.files(category), 0);
        }
    }

    /// Categories must come out descending by total size so the largest
    /// bucket renders first.
    #[test]
    fn breakdown_sorted_by_size_descending() {
        let index = MemoryIndex::new()
            .with_record(FileRecord::with_mime("/big.zip", 1_000, "application/zip"))
            .with_record(FileRecord::with_mime("/small.png", 10, "image/png"));

        let breakdown = run(&index);
        let categories = breakdown.categories();
        assert_eq!(categories[0].category, FileCategory::Archives);
        assert_eq!(categories[1].category, FileCategory::Images);
        assert!(categories[0].total_size >= categories[1].total_size);
    }

    #[test]
    fn file_counts_track_rows_per_category() {
        let index = MemoryIndex::new()
            .with_record(FileRecord::with_mime("/a.jpg", 1, "image/jpeg"))
            .with_record(FileRecord::with_mime("/b.jpg", 2, "image/jpeg"))
            .with_record(FileRecord::with_mime("/c.mp3", 3, "audio/mpeg"));

        let breakdown = run(&index);
        assert_eq!(breakdown.files(FileCategory::Images), 2);
        assert_eq!(breakdown.files(FileCategory::Audio), 1);
        assert_eq!(breakdown.files(FileCategory::Videos), 0);
    }
}
