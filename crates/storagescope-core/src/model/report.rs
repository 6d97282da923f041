/// The per-pass output object: category breakdown plus volume capacity.
use crate::analysis::UsageBreakdown;
use crate::model::VolumeStats;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io::Write;

/// One completed overview pass.
///
/// Newly constructed per invocation and owned by the caller; passes share
/// no state. `volume` is `None` when no primary volume reading was
/// available, in which case the total/free figures stay unknown rather
/// than reporting zeroes as facts.
#[derive(Debug, Clone, Serialize)]
pub struct StorageReport {
    pub breakdown: UsageBreakdown,
    pub volume: Option<VolumeStats>,
    /// Wall-clock timestamp of when the pass finished.
    pub generated_at: DateTime<Local>,
}

impl StorageReport {
    pub fn new(breakdown: UsageBreakdown, volume: Option<VolumeStats>) -> Self {
        Self {
            breakdown,
            volume,
            generated_at: Local::now(),
        }
    }

    /// Total capacity in bytes; 0 when the volume is unknown.
    pub fn total_bytes(&self) -> u64 {
        self.volume.as_ref().map_or(0, |v| v.total_bytes)
    }

    /// Free space in bytes; 0 when the volume is unknown.
    pub fn free_bytes(&self) -> u64 {
        self.volume.as_ref().map_or(0, |v| v.free_bytes)
    }

    /// Used space in bytes; 0 when the volume is unknown.
    pub fn used_bytes(&self) -> u64 {
        self.volume.as_ref().map_or(0, |v| v.used_bytes)
    }

    /// Serialise the full report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the category breakdown as CSV rows.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut w = csv::Writer::from_writer(writer);
        w.write_record(["category", "bytes", "files"])?;
        for usage in self.breakdown.categories() {
            w.write_record([
                usage.category.label(),
                &usage.total_size.to_string(),
                &usage.file_count.to_string(),
            ])?;
        }
        w.flush()?;
        Ok(())
    }
}
