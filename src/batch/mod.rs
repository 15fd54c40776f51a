//! Crop batch execution
//!
//! Each crop job is rendered, extracted and written independently; the
//! outcome of every job is kept in a [`RunReport`] so one bad page or
//! rectangle does not hide the results of the rest of the run.

mod report;
mod runner;

pub use report::{JobOutcome, RunReport};
pub use runner::BatchRunner;
