/// Overview progress reporting — lightweight messages sent from the worker
/// thread to the caller via a crossbeam channel.

use crate::model::{StorageReport, VolumeStats};
use std::time::Duration;

/// Events sent from the overview worker to the caller.
///
/// Running category totals live in the shared `LiveTotals`; these messages
/// carry only small counters plus the final report. Exactly one terminal
/// event (`Complete` or `Cancelled`) is sent per pass.
#[derive(Debug)]
pub enum OverviewEvent {
    /// Primary-volume capacity, sent once before the record scan starts.
    /// `None` means no reading was primary; the caller keeps its prior
    /// "unknown" display state.
    Volume(Option<VolumeStats>),
    /// Periodic update with running totals.
    Update {
        records_seen: u64,
        classified_bytes: u64,
    },
    /// The pass finished. The report is fresh and owned by the receiver.
    Complete {
        report: StorageReport,
        duration: Duration,
    },
    /// The pass was cancelled before completing.
    Cancelled,
}
