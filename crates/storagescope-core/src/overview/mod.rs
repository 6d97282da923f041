/// Overview module — orchestrates the aggregation pass.
///
/// The record scan and the volume read are I/O-bound, so the whole pass
/// runs on a background worker and the caller stays responsive: spawn with
/// [`start_overview`], then drain [`progress::OverviewEvent`]s from the
/// handle. Each pass allocates its own accumulator and report and shares
/// nothing with other passes; overlapping passes are told apart by their
/// generation token, and the caller keeps only the newest generation's
/// events.
pub mod progress;

use crate::analysis::{primary_volume, CategoryTable, UsageAccumulator, UsageBreakdown};
use crate::model::{StorageReport, VolumeReading};
use crate::source::MediaIndex;
use progress::OverviewEvent;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

/// Shared running totals, updated in batches during the pass.
///
/// The worker takes the write lock once per batch; a frontend may take the
/// read lock every frame to render a live view.
pub type LiveTotals = Arc<RwLock<UsageBreakdown>>;

/// Rows consumed between live-totals flushes. The cancel flag is also
/// polled at this granularity, so cancellation lands within one batch.
const BATCH_SIZE: u64 = 512;

/// Maximum number of events that may queue up in the channel.
///
/// A caller that stops draining back-pressures the worker into blocking on
/// `send` rather than consuming unbounded heap.
pub const EVENT_CHANNEL_CAPACITY: usize = 1_024;

/// Source of pass generation tokens. Strictly increasing per process, so
/// a larger token always identifies a newer pass.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Handle to a running or completed overview pass.
pub struct OverviewHandle {
    /// Receiver for events from the worker thread.
    pub events_rx: Receiver<OverviewEvent>,
    /// Shared totals that grow while the pass runs.
    pub live_totals: LiveTotals,
    /// Token identifying this pass; larger means newer. A caller with two
    /// passes in flight keeps events from the larger generation only.
    pub generation: u64,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the worker thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl OverviewHandle {
    /// Request the pass to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Start an overview pass on a background thread.
///
/// Returns an `OverviewHandle` for receiving events, reading live totals,
/// and requesting cancellation. `readings` are consumed as given —
/// enumerating mount points is the caller's concern.
pub fn start_overview<S>(
    index: S,
    readings: Vec<VolumeReading>,
    table: CategoryTable,
) -> OverviewHandle
where
    S: MediaIndex + Send + 'static,
{
    let (events_tx, events_rx) = crossbeam_channel::bounded::<OverviewEvent>(EVENT_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let live_totals: LiveTotals = Arc::new(RwLock::new(UsageBreakdown::empty()));
    let totals_clone = live_totals.clone();

    let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);

    let thread = thread::Builder::new()
        .name(format!("storagescope-overview-{generation}"))
        .spawn(move || {
            run_pass(index, readings, table, events_tx, cancel_clone, totals_clone);
        })
        .expect("failed to spawn overview thread");

    OverviewHandle {
        events_rx,
        live_totals,
        generation,
        cancel_flag,
        _thread: Some(thread),
    }
}

/// The worker body: volume stats first, then the record scan.
fn run_pass<S: MediaIndex>(
    index: S,
    readings: Vec<VolumeReading>,
    table: CategoryTable,
    events_tx: Sender<OverviewEvent>,
    cancel_flag: Arc<AtomicBool>,
    live_totals: LiveTotals,
) {
    let start = Instant::now();
    info!("starting storage overview pass");

    // Volume stats are cheap; surface them before the record scan so the
    // caller can show capacity while totals are still accumulating.
    let volume = primary_volume(&readings);
    let _ = events_tx.send(OverviewEvent::Volume(volume.clone()));

    let breakdown = match index.records() {
        Ok(records) => {
            let mut acc = UsageAccumulator::new();
            let mut since_flush: u64 = 0;

            for row in records {
                match row {
                    Ok(record) => acc.add(&record, &table, |p| index.is_dir(p)),
                    Err(err) => acc.add_error(&err),
                }

                since_flush += 1;
                if since_flush == BATCH_SIZE {
                    since_flush = 0;

                    if cancel_flag.load(Ordering::Relaxed) {
                        let _ = events_tx.send(OverviewEvent::Cancelled);
                        return;
                    }

                    *live_totals.write() = acc.snapshot();
                    let _ = events_tx.send(OverviewEvent::Update {
                        records_seen: acc.records_seen(),
                        classified_bytes: acc.classified_bytes(),
                    });
                }
            }
            acc.finish()
        }
        Err(err) => {
            // Best effort: the caller still gets its report, with every
            // category at zero, rather than an error or a partial result.
            warn!("media index unavailable, reporting zero totals: {err}");
            UsageBreakdown::empty()
        }
    };

    *live_totals.write() = breakdown.clone();

    let report = StorageReport::new(breakdown, volume);
    let duration = start.elapsed();
    info!(
        ?duration,
        classified_bytes = report.breakdown.classified_bytes(),
        skipped_records = report.breakdown.skipped_records,
        "overview pass complete"
    );
    let _ = events_tx.send(OverviewEvent::Complete { report, duration });
}
