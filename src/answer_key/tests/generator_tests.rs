//! Tests for building answer keys from literal tables

extern crate std;

use crate::answer_key::{question_count, AnswerKeySpec, AnswerLetter};
use crate::errors::ExamError;

const SMALL_SPEC: &str = r#"
title_prefix = "Sample Test"
image_template = "images/sample/{test}/q{n}.png"
section_size = 2
sections = ["First pair", "Second pair"]

[tests]
test7 = ["AB", "C D"]
"#;

#[test]
fn test_builtin_spec_covers_three_tests() {
    let spec = AnswerKeySpec::builtin().unwrap();
    let key = spec.generate().unwrap();

    std::assert_eq!(key.keys().collect::<Vec<_>>(), vec!["test1", "test2", "test3"]);
    std::assert_eq!(question_count(&key), 240);
    std::assert_eq!(key["test2"].title, "Non-Verbal Reasoning Test 2");
    std::assert_eq!(spec.output, std::path::Path::new("data/non-verbal-reasoning.json"));
}

#[test]
fn test_question_45_uses_third_section_and_45th_answer() {
    let spec = AnswerKeySpec::builtin().unwrap();
    let key = spec.generate().unwrap();

    for (test, expected) in [("test1", AnswerLetter::C), ("test2", AnswerLetter::C), ("test3", AnswerLetter::E)] {
        let answers = spec.answers(test).unwrap();
        std::assert_eq!(answers.len(), 80);

        let q45 = &key[test].questions[44];
        std::assert_eq!(q45.id, 45);
        std::assert_eq!(q45.instruction, "Find the most similar figure");
        std::assert_eq!(q45.correct_answer, answers[44]);
        std::assert_eq!(q45.correct_answer, expected);
        std::assert_eq!(q45.image, format!("images/non-verbal-reasoning/{}/q45.png", test));
    }
}

#[test]
fn test_section_boundaries() {
    let spec = AnswerKeySpec::builtin().unwrap();
    std::assert_eq!(spec.section_label(1).unwrap(), "Complete the sequence");
    std::assert_eq!(spec.section_label(20).unwrap(), "Complete the sequence");
    std::assert_eq!(spec.section_label(21).unwrap(), "Find the matching relationship");
    std::assert_eq!(spec.section_label(41).unwrap(), "Find the most similar figure");
    std::assert_eq!(spec.section_label(60).unwrap(), "Find the most similar figure");
    std::assert_eq!(spec.section_label(61).unwrap(), "Decode the pattern");
    std::assert_eq!(spec.section_label(80).unwrap(), "Decode the pattern");
    std::assert!(spec.section_label(0).is_err());
    std::assert!(spec.section_label(81).is_err());
}

#[test]
fn test_builtin_first_answers_match_table() {
    let spec = AnswerKeySpec::builtin().unwrap();
    let answers = spec.answers("test1").unwrap();
    let first: String = answers[..10].iter().map(|a| a.as_str()).collect();
    std::assert_eq!(first, "BBDBDADDCD");
    std::assert_eq!(answers[79], AnswerLetter::A);
}

#[test]
fn test_small_spec_generation() {
    let spec = AnswerKeySpec::from_toml_str(SMALL_SPEC).unwrap();
    let key = spec.generate().unwrap();
    let test = &key["test7"];

    std::assert_eq!(test.title, "Sample Test 7");
    let summary: Vec<(u32, &str, AnswerLetter)> = test
        .questions
        .iter()
        .map(|q| (q.id, q.instruction.as_str(), q.correct_answer))
        .collect();
    std::assert_eq!(
        summary,
        vec![
            (1, "First pair", AnswerLetter::A),
            (2, "First pair", AnswerLetter::B),
            (3, "Second pair", AnswerLetter::C),
            (4, "Second pair", AnswerLetter::D),
        ]
    );
    std::assert_eq!(test.questions[2].question, "Question 3");
}

#[test]
fn test_options_are_five_identical_letters() {
    let spec = AnswerKeySpec::from_toml_str(SMALL_SPEC).unwrap();
    let key = spec.generate().unwrap();
    let options = &key["test7"].questions[0].options;

    let pairs: Vec<(&str, &str)> = options.iter().map(|o| (o.letter.as_str(), o.text.as_str())).collect();
    std::assert_eq!(pairs, vec![("A", "A"), ("B", "B"), ("C", "C"), ("D", "D"), ("E", "E")]);
}

#[test]
fn test_json_shape() {
    let spec = AnswerKeySpec::from_toml_str(SMALL_SPEC).unwrap();
    let key = spec.generate().unwrap();
    let value = serde_json::to_value(&key).unwrap();

    let question = &value["test7"]["questions"][3];
    std::assert_eq!(question["id"], 4);
    std::assert_eq!(question["correctAnswer"], "D");
    std::assert_eq!(question["image"], "images/sample/test7/q4.png");
    std::assert_eq!(question["options"][4]["letter"], "E");
    std::assert!(question.get("correct_answer").is_none());
    std::assert_eq!(value["test7"]["title"], "Sample Test 7");
}

#[test]
fn test_bad_letter_is_rejected() {
    let result = AnswerKeySpec::from_toml_str(&SMALL_SPEC.replace("C D", "C F"));
    match result {
        Err(ExamError::Config(msg)) => std::assert!(msg.contains("'F'")),
        other => panic!("expected Config error, got {:?}", other.map(|s| s.tests.len())),
    }
}

#[test]
fn test_too_many_answers_is_rejected() {
    let result = AnswerKeySpec::from_toml_str(&SMALL_SPEC.replace("C D", "C D E"));
    std::assert!(matches!(result, Err(ExamError::Config(_))));
}

#[test]
fn test_image_template_must_number_questions() {
    let result = AnswerKeySpec::from_toml_str(&SMALL_SPEC.replace("q{n}.png", "q.png"));
    std::assert!(matches!(result, Err(ExamError::Config(_))));
}

#[test]
fn test_missing_answer_file() {
    let result = AnswerKeySpec::from_file("missing/answers.toml");
    std::assert!(matches!(result, Err(ExamError::MissingFile(_))));
}

#[test]
fn test_huge_section_size_does_not_overflow() {
    let spec = AnswerKeySpec::from_toml_str(&SMALL_SPEC.replace("section_size = 2", "section_size = 4294967295"))
        .unwrap();

    std::assert_eq!(spec.capacity(), 2 * u64::from(u32::MAX));
    std::assert_eq!(spec.section_label(4).unwrap(), "First pair");
    std::assert_eq!(spec.generate().unwrap()["test7"].questions.len(), 4);
}
