//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `steps.csv`
//! - `comparison.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, ResultRow, StepRow};

pub const STEP_HEADER: [&str; 10] = [
    "algorithm", "step", "north", "south", "east", "west", "phase", "action", "waiting",
    "plan_time_ms",
];

pub const RESULT_HEADER: [&str; 7] = [
    "algorithm", "total_waiting", "avg_waiting", "switches", "avg_step_time_ms", "steps",
    "cancelled",
];

/// Writes run output to two CSV files.
pub struct CsvWriter {
    steps:    Writer<File>,
    results:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both CSV files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(STEP_HEADER)?;

        let mut results = Writer::from_path(dir.join("comparison.csv"))?;
        results.write_record(RESULT_HEADER)?;

        Ok(Self {
            steps,
            results,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()> {
        for row in rows {
            self.steps.write_record(&[
                row.algorithm.clone(),
                row.step.to_string(),
                row.north.to_string(),
                row.south.to_string(),
                row.east.to_string(),
                row.west.to_string(),
                row.phase.as_str().to_owned(),
                row.action.as_str().to_owned(),
                row.waiting.to_string(),
                format!("{:.6}", row.plan_time_ms),
            ])?;
        }
        Ok(())
    }

    fn write_result(&mut self, row: &ResultRow) -> OutputResult<()> {
        self.results.write_record(&[
            row.algorithm.clone(),
            row.total_waiting.to_string(),
            format!("{:.4}", row.avg_waiting),
            row.switches.to_string(),
            format!("{:.6}", row.avg_step_time_ms),
            row.steps.to_string(),
            (row.cancelled as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.results.flush()?;
        Ok(())
    }
}
