//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod extract_command;
pub mod answer_key_command;
pub mod list_command;

pub use command_traits::{Command, CommandFactory};
pub use extract_command::ExtractCommand;
pub use answer_key_command::AnswerKeyCommand;
pub use list_command::ListCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::errors::ExamResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct ExamkitCommandFactory;

impl ExamkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ExamkitCommandFactory
    }
}

impl Default for ExamkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for ExamkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> ExamResult<Box<dyn Command + 'a>> {
        if args.get_flag("list") {
            Ok(Box::new(ListCommand::new(args)?))
        } else if args.get_flag("answer-key") {
            Ok(Box::new(AnswerKeyCommand::new(args, logger)?))
        } else {
            // Default to cropping the configured batches
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        }
    }
}
