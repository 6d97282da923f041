/// Analysis modules — classification and aggregation over media-index rows.

pub mod aggregate;
pub mod categories;
pub mod volumes;

pub use aggregate::{
    classify_and_sum, classify_record, CategoryUsage, UsageAccumulator, UsageBreakdown,
    DIRECTORY_ENTRY_SIZE,
};
pub use categories::{classify_mime, CategoryTable, FileCategory};
pub use volumes::primary_volume;
