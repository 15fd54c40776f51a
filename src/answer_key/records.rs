//! Answer-key JSON records
//!
//! Field names and order follow the data file the quiz front end reads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ExamError, ExamResult};

/// Multiple-choice answer letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
    E,
}

impl AnswerLetter {
    /// All letters in display order
    pub const ALL: [AnswerLetter; 5] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
        AnswerLetter::E,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerLetter::A => "A",
            AnswerLetter::B => "B",
            AnswerLetter::C => "C",
            AnswerLetter::D => "D",
            AnswerLetter::E => "E",
        }
    }
}

impl TryFrom<char> for AnswerLetter {
    type Error = ExamError;

    fn try_from(c: char) -> ExamResult<Self> {
        match c {
            'A' => Ok(AnswerLetter::A),
            'B' => Ok(AnswerLetter::B),
            'C' => Ok(AnswerLetter::C),
            'D' => Ok(AnswerLetter::D),
            'E' => Ok(AnswerLetter::E),
            other => Err(ExamError::Config(format!("'{}' is not an answer letter (A-E)", other))),
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option of a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub letter: AnswerLetter,
    pub text: String,
}

impl AnswerOption {
    /// The five lettered options, each displaying its own letter
    pub fn lettered() -> Vec<AnswerOption> {
        AnswerLetter::ALL
            .iter()
            .map(|letter| AnswerOption {
                letter: *letter,
                text: letter.as_str().to_string(),
            })
            .collect()
    }
}

/// A single question as stored in the answer key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u32,
    pub question: String,
    pub instruction: String,
    pub image: String,
    pub options: Vec<AnswerOption>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: AnswerLetter,
}

/// One test: its title and questions in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub title: String,
    pub questions: Vec<QuestionRecord>,
}

/// Whole answer-key document, keyed by test id ("test1", ...)
pub type AnswerKey = BTreeMap<String, TestRecord>;
