//! Per-job outcomes collected over a run

use std::fmt;
use std::path::PathBuf;

use crate::errors::ExamError;

/// What a single crop job produced
#[derive(Debug)]
pub struct JobOutcome {
    /// Batch the job belongs to
    pub batch: String,
    /// Job label, e.g. "Q12"
    pub label: String,
    /// Destination the job writes to
    pub output: PathBuf,
    /// Dimensions of the written image, or why the job failed
    pub result: Result<(u32, u32), ExamError>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of every job in a run, in execution order
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<JobOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        RunReport::default()
    }

    pub fn push(&mut self, outcome: JobOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[JobOutcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Failed jobs with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&JobOutcome, &ExamError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o, e)))
    }

    /// True when every job succeeded
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} crop jobs succeeded", self.succeeded(), self.total())?;
        if !self.is_success() {
            write!(f, ", {} failed:", self.failed())?;
            for (outcome, error) in self.failures() {
                write!(f, "\n  [{}] {}: {}", outcome.batch, outcome.label, error)?;
            }
        }
        Ok(())
    }
}
