//! Answer-key generation command
//!
//! This module implements the command for writing the answer-key JSON
//! document from the literal answer tables.

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::answer_key::{self, AnswerKeySpec};
use crate::commands::command_traits::Command;
use crate::errors::ExamResult;
use crate::utils::logger::Logger;

/// Command for generating the answer-key data file
pub struct AnswerKeyCommand<'a> {
    /// Answer table file (built-in tables when absent)
    config_file: Option<PathBuf>,
    /// Directory the output path is relative to
    output_root: PathBuf,
    /// Logger for recording run summaries
    logger: &'a Logger,
}

impl<'a> AnswerKeyCommand<'a> {
    /// Create a new answer-key command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording run summaries
    ///
    /// # Returns
    /// A new AnswerKeyCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExamResult<Self> {
        let config_file = args.get_one::<String>("answer-config").map(PathBuf::from);
        let output_root = args.get_one::<String>("output").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        info!("Answer tables: {:?}, output root: {}", config_file, output_root.display());

        Ok(AnswerKeyCommand {
            config_file,
            output_root,
            logger,
        })
    }
}

impl<'a> Command for AnswerKeyCommand<'a> {
    fn execute(&self) -> ExamResult<()> {
        let spec = match &self.config_file {
            Some(path) => AnswerKeySpec::from_file(path)?,
            None => AnswerKeySpec::builtin()?,
        };

        let key = spec.generate()?;
        let output = self.output_root.join(&spec.output);
        let size = answer_key::write_answer_key(&key, &output)?;
        let questions = answer_key::question_count(&key);

        println!("✓ Successfully generated {}", output.display());
        println!("  - {} tests created", key.len());
        for (test, record) in &key {
            println!("  - {}: {} questions", test, record.questions.len());
        }
        println!("  - {} total questions", questions);
        println!("\nFile size: {} bytes", size);

        self.logger.write_line(&format!(
            "Generated {} ({} tests, {} questions, {} bytes)",
            output.display(),
            key.len(),
            questions,
            size
        ))?;

        Ok(())
    }
}
