//! `StepCsvObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tl_sim::{RunResult, SimConfig, SimObserver, StepRecord};

use crate::row::{ResultRow, StepRow};
use crate::writer::OutputWriter;
use crate::{CsvWriter, OutputError, OutputResult};

/// Rows buffered before a batch is handed to the writer.
const BATCH: usize = 64;

/// A [`SimObserver`] that writes every step and every run summary to an
/// [`OutputWriter`] backend.
///
/// One observer can record several runs (a whole comparison); the algorithm
/// name is taken from `on_run_start`.  Errors from the writer are stored
/// because `SimObserver` methods have no return value; check them with
/// [`take_error`][Self::take_error] once the runs are done.
pub struct StepCsvObserver<W: OutputWriter = CsvWriter> {
    writer:     W,
    algorithm:  String,
    pending:    Vec<StepRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> StepCsvObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            algorithm:  String::new(),
            pending:    Vec::with_capacity(BATCH),
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Write buffered rows and flush the writer.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.flush_pending();
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(mut self) -> W {
        self.flush_pending();
        self.writer
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_steps(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for StepCsvObserver<W> {
    fn on_run_start(&mut self, algorithm: &str, _config: &SimConfig) {
        algorithm.clone_into(&mut self.algorithm);
    }

    fn on_step(&mut self, record: &StepRecord) {
        self.pending.push(StepRow::from_record(&self.algorithm, record));
        if self.pending.len() >= BATCH {
            self.flush_pending();
        }
    }

    fn on_run_end(&mut self, result: &RunResult) {
        self.flush_pending();
        let result = self.writer.write_result(&ResultRow::from(result));
        self.store_err(result);
    }
}
