//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, ResultRow, StepRow};

/// Sink for per-step rows and per-run summaries.
///
/// Errors surface through [`StepCsvObserver::take_error`][crate::StepCsvObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write a batch of step rows.
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()>;

    /// Write one run summary.
    fn write_result(&mut self, row: &ResultRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
