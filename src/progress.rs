// src/progress.rs
use crate::specs::photos::PhotoRecord;

/// Lightweight progress reporting for a collection run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once the declared total is known (after the first page).
    fn begin(&mut self, _total: u64) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called for each newly rendered record, in discovery order.
    fn record(&mut self, _rec: &PhotoRecord) {}

    /// Called after each page with the running `(fetched, total)` pair.
    fn page_done(&mut self, _fetched: u64, _total: u64) {}

    /// Called at the end, whatever the stop reason.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
