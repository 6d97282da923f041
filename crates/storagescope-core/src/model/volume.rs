/// Volume capacity stats with derived figures and display strings.
use crate::model::size;
use serde::Serialize;

/// Divisor used to compress byte counts into the bounded numeric range of a
/// visual usage indicator. Division truncates toward zero; the indicator's
/// max is `total_bytes / SIZE_DIVIDER` and its value is
/// `used_bytes / SIZE_DIVIDER`.
pub const SIZE_DIVIDER: u64 = 100_000;

/// Scale an arbitrary byte quantity to indicator units.
#[inline]
pub fn to_indicator_units(bytes: u64) -> u64 {
    bytes / SIZE_DIVIDER
}

/// Capacity figures for a single storage volume.
#[derive(Debug, Clone, Serialize)]
pub struct VolumeStats {
    /// Total capacity in bytes.
    pub total_bytes: u64,
    /// Free space in bytes.
    pub free_bytes: u64,
    /// Used space in bytes.
    pub used_bytes: u64,
    /// Usage percentage (0.0–100.0).
    pub usage_percent: f32,
    /// Formatted total size string.
    pub total_display: String,
    /// Formatted free size string.
    pub free_display: String,
    /// Formatted used size string.
    pub used_display: String,
}

impl VolumeStats {
    /// Build stats from a raw capacity reading.
    pub fn new(total_bytes: u64, free_bytes: u64) -> Self {
        let used_bytes = total_bytes.saturating_sub(free_bytes);
        let usage_percent = if total_bytes > 0 {
            (used_bytes as f64 / total_bytes as f64 * 100.0) as f32
        } else {
            0.0
        };

        Self {
            total_bytes,
            free_bytes,
            used_bytes,
            usage_percent,
            total_display: size::format_size_thousand(total_bytes),
            free_display: size::format_size_thousand(free_bytes),
            used_display: size::format_size_thousand(used_bytes),
        }
    }

    /// Upper bound for a bounded-range usage indicator.
    #[inline]
    pub fn indicator_max(&self) -> u64 {
        self.total_bytes / SIZE_DIVIDER
    }

    /// Current value for a bounded-range usage indicator.
    #[inline]
    pub fn indicator_value(&self) -> u64 {
        self.used_bytes / SIZE_DIVIDER
    }
}
