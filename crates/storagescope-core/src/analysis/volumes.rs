/// Primary-volume selection over raw capacity readings.
use crate::model::{VolumeReading, VolumeStats};
use tracing::debug;

/// Return stats for the first primary reading, or `None` when no reading
/// is primary.
///
/// Non-primary readings (removable media) are read but not folded into the
/// result; a caller that wants them still holds the raw slice. With `None`
/// the caller leaves its total/free display in the prior "unknown" state.
pub fn primary_volume(readings: &[VolumeReading]) -> Option<VolumeStats> {
    for reading in readings {
        if reading.is_primary {
            return Some(VolumeStats::new(reading.total_bytes, reading.free_bytes));
        }
        debug!(
            total = reading.total_bytes,
            free = reading.free_bytes,
            "ignoring non-primary volume reading"
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(is_primary: bool, total_bytes: u64, free_bytes: u64) -> VolumeReading {
        VolumeReading {
            is_primary,
            total_bytes,
            free_bytes,
        }
    }

    #[test]
    fn first_primary_reading_wins() {
        let readings = [
            reading(false, 64_000_000_000, 1_000_000_000),
            reading(true, 16_000_000_000, 4_000_000_000),
            reading(true, 8_000_000_000, 2_000_000_000),
        ];
        let stats = primary_volume(&readings).expect("a primary reading exists");
        assert_eq!(stats.total_bytes, 16_000_000_000);
        assert_eq!(stats.free_bytes, 4_000_000_000);
        assert_eq!(stats.used_bytes, 12_000_000_000);
    }

    #[test]
    fn empty_input_returns_none() {
        assert!(primary_volume(&[]).is_none());
    }

    /// Removable-only readings yield no result; they are never aggregated
    /// into a substitute total.
    #[test]
    fn no_primary_reading_returns_none() {
        let readings = [
            reading(false, 64_000_000_000, 1_000_000_000),
            reading(false, 32_000_000_000, 5_000_000_000),
        ];
        assert!(primary_volume(&readings).is_none());
    }
}
