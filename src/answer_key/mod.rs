//! Answer-key data file generation
//!
//! Turns literal per-test answer tables into the nested JSON document the
//! quiz front end loads: one entry per test, each holding a title and its
//! question records with section instructions, image paths, lettered
//! options and the correct answer.

mod records;
mod generator;
#[cfg(test)]
mod tests;

pub use records::{AnswerKey, AnswerLetter, AnswerOption, QuestionRecord, TestRecord};
pub use generator::{question_count, AnswerKeySpec, BUILTIN_ANSWER_KEYS};

use std::path::Path;

use log::info;

use crate::errors::ExamResult;
use crate::utils::write_utils;

/// Write `key` as pretty-printed JSON to `path`
///
/// # Returns
/// The size of the written file in bytes
pub fn write_answer_key(key: &AnswerKey, path: &Path) -> ExamResult<usize> {
    let size = write_utils::write_json(key, path)?;
    info!("Wrote answer key with {} tests to {} ({} bytes)", key.len(), path.display(), size);
    Ok(size)
}
