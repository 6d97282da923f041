/// StorageScope Core — classification, aggregation, and data model.
///
/// This crate contains all engine logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI, TUI).
///
/// # Modules
///
/// - [`model`] — Input rows, volume stats, the storage report, size formatting.
/// - [`analysis`] — Category table, the classify-and-sum pass, primary-volume selection.
/// - [`source`] — The media-index seam plus in-memory and filesystem implementations.
/// - [`overview`] — Background-pass orchestration with live totals and progress events.
pub mod analysis;
pub mod model;
pub mod overview;
pub mod source;
