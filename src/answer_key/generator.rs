//! Answer-key generation from literal answer tables

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::errors::{ExamError, ExamResult};
use crate::utils::template;

use super::records::{AnswerKey, AnswerLetter, AnswerOption, QuestionRecord, TestRecord};

/// Non-verbal reasoning answer tables, embedded at build time
pub const BUILTIN_ANSWER_KEYS: &str = include_str!("../../config/answer_keys.toml");

/// Literal answer tables plus the scheme used to number and label questions
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerKeySpec {
    /// Where the JSON document is written, relative to the output root
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Test titles are this prefix followed by the test number
    pub title_prefix: String,
    /// Image path template; `{test}` and `{n}` are substituted
    pub image_template: String,
    /// Number of consecutive questions sharing an instruction
    #[serde(default = "default_section_size")]
    pub section_size: u32,
    /// Instruction label of each section, in order
    pub sections: Vec<String>,
    /// Answer strings per test id; whitespace is ignored
    pub tests: BTreeMap<String, Vec<String>>,
}

fn default_output() -> PathBuf {
    PathBuf::from("data/non-verbal-reasoning.json")
}

fn default_section_size() -> u32 {
    20
}

impl AnswerKeySpec {
    /// The answer tables compiled into the binary
    pub fn builtin() -> ExamResult<Self> {
        Self::from_toml_str(BUILTIN_ANSWER_KEYS)
    }

    /// Load answer tables from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ExamResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExamError::MissingFile(path.to_path_buf()));
        }

        info!("Loading answer tables from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate answer tables from TOML text
    pub fn from_toml_str(content: &str) -> ExamResult<Self> {
        let spec: AnswerKeySpec = toml::from_str(content)?;

        if spec.section_size == 0 {
            return Err(ExamError::Config("section_size must be at least 1".to_string()));
        }
        if spec.sections.is_empty() {
            return Err(ExamError::Config("At least one section label is required".to_string()));
        }
        if spec.tests.is_empty() {
            return Err(ExamError::Config("No answer tables defined".to_string()));
        }
        template::require_placeholder(&spec.image_template, "n")?;

        // Surface bad letters and oversized tables at load time.
        for test in spec.tests.keys() {
            spec.answers(test)?;
        }

        Ok(spec)
    }

    /// Highest question number the section labels cover
    pub fn capacity(&self) -> u64 {
        u64::from(self.section_size).saturating_mul(self.sections.len() as u64)
    }

    /// Parsed answer letters of `test`, question 1 first
    pub fn answers(&self, test: &str) -> ExamResult<Vec<AnswerLetter>> {
        let rows = self
            .tests
            .get(test)
            .ok_or_else(|| ExamError::Config(format!("No answer table for \"{}\"", test)))?;

        let answers = rows
            .iter()
            .flat_map(|row| row.chars())
            .filter(|c| !c.is_whitespace())
            .map(|c| AnswerLetter::try_from(c))
            .collect::<ExamResult<Vec<_>>>()
            .map_err(|e| ExamError::Config(format!("Answer table \"{}\": {}", test, e)))?;

        if answers.is_empty() {
            return Err(ExamError::Config(format!("Answer table \"{}\" is empty", test)));
        }
        if answers.len() as u64 > self.capacity() {
            return Err(ExamError::Config(format!(
                "Answer table \"{}\" has {} answers but the sections only cover {} questions",
                test,
                answers.len(),
                self.capacity()
            )));
        }

        Ok(answers)
    }

    /// Instruction label for question `id` (1-based)
    pub fn section_label(&self, id: u32) -> ExamResult<&str> {
        if id == 0 || u64::from(id) > self.capacity() {
            return Err(ExamError::Config(format!(
                "Question {} is outside the {} sections",
                id,
                self.sections.len()
            )));
        }
        let section = ((id - 1) / self.section_size) as usize;
        Ok(&self.sections[section])
    }

    /// Build the record for question `id` of `test`
    pub fn question(&self, test: &str, id: u32, answer: AnswerLetter) -> ExamResult<QuestionRecord> {
        let n = id.to_string();
        let image = template::expand(&self.image_template, &[("test", test), ("n", n.as_str())])?;

        Ok(QuestionRecord {
            id,
            question: format!("Question {}", id),
            instruction: self.section_label(id)?.to_string(),
            image,
            options: AnswerOption::lettered(),
            correct_answer: answer,
        })
    }

    /// Build the full answer-key document
    pub fn generate(&self) -> ExamResult<AnswerKey> {
        let mut key = AnswerKey::new();

        for test in self.tests.keys() {
            let answers = self.answers(test)?;
            let questions = answers
                .iter()
                .enumerate()
                .map(|(index, answer)| self.question(test, index as u32 + 1, *answer))
                .collect::<ExamResult<Vec<_>>>()?;

            debug!("Built {} questions for {}", questions.len(), test);
            key.insert(
                test.clone(),
                TestRecord {
                    title: format!("{} {}", self.title_prefix, test_number(test)),
                    questions,
                },
            );
        }

        Ok(key)
    }
}

/// Trailing digits of a test id ("test3" -> "3"), or the whole id
fn test_number(test: &str) -> &str {
    let digits = test.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        test
    } else {
        &test[test.len() - digits..]
    }
}

/// Total number of questions across all tests of `key`
pub fn question_count(key: &AnswerKey) -> usize {
    key.values().map(|t| t.questions.len()).sum()
}
