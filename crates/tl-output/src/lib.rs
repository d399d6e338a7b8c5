//! `tl-output` — run output for the intersection planner workspace.
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`csv`]    | [`CsvWriter`]: `steps.csv` and `comparison.csv`            |
//! | [`observer`] | [`StepCsvObserver`], driving any [`OutputWriter`]       |
//! | [`report`] | fixed-width terminal tables and the [`TablePrinter`] observer |
//!
//! # Usage
//!
//! ```rust,ignore
//! use tl_output::{CsvWriter, StepCsvObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = StepCsvObserver::new(writer);
//! let comparison = compare_algorithms(&config, &mut obs)?;
//! obs.finish()?;
//! println!("{}", report::comparison_table(&comparison));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StepCsvObserver;
pub use report::TablePrinter;
pub use row::{ResultRow, StepRow};
pub use writer::OutputWriter;
