//! Crop plan listing command

use clap::ArgMatches;
use std::path::PathBuf;

use crate::commands::command_traits::Command;
use crate::config::CropPlan;
use crate::errors::ExamResult;

/// Command for printing the batches of a crop plan
pub struct ListCommand {
    /// Crop plan file (built-in plan when absent)
    config_file: Option<PathBuf>,
}

impl ListCommand {
    pub fn new(args: &ArgMatches) -> ExamResult<Self> {
        Ok(ListCommand {
            config_file: args.get_one::<String>("config").map(PathBuf::from),
        })
    }
}

impl Command for ListCommand {
    fn execute(&self) -> ExamResult<()> {
        let plan = CropPlan::load(self.config_file.as_deref())?;

        for batch in plan.batches() {
            let marker = if batch.default { "" } else { " (opt-in)" };
            println!("{}{}", batch.name, marker);
            println!("  {}: {} jobs from {}", batch.title, batch.jobs.len(), batch.document.display());
        }

        Ok(())
    }
}
