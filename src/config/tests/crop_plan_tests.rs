//! Tests for crop plan parsing and validation

extern crate std;

use std::path::Path;

use crate::config::CropPlan;
use crate::errors::ExamError;

const LITERAL_PLAN: &str = r#"
[[batch]]
name = "sample"
document = "exams/sample.pdf"

[[batch.job]]
question = 2
page = 1
rect = [0.1, 0.2, 0.9, 0.5]
output = "images/sample_q2.png"

[[batch.job]]
page = 2
rect = [0.0, 0.0, 1.0, 1.0]
output = "images/sample_page2.png"
"#;

#[test]
fn test_literal_plan() {
    let plan = CropPlan::from_toml_str(LITERAL_PLAN).unwrap();
    let batch = plan.batch("sample").unwrap();

    std::assert_eq!(batch.title, "sample");
    std::assert!(batch.default);
    std::assert_eq!(batch.jobs.len(), 2);
    std::assert_eq!(batch.jobs[0].label(), "Q2");
    std::assert_eq!(batch.jobs[1].label(), "sample_page2.png");
}

#[test]
fn test_grid_expands_pages_times_slots() {
    let plan = CropPlan::from_toml_str(
        r#"
[[batch]]
name = "grid"
title = "Grid"
document = "grid.pdf"

[batch.grid]
pages = [4, 7]
slots = [[0.0, 0.0, 1.0, 0.5], [0.0, 0.5, 1.0, 1.0]]
name_template = "out/{batch}/q{n}.png"
first_question = 11
"#,
    )
    .unwrap();

    let jobs = &plan.batch("grid").unwrap().jobs;
    let summary: Vec<(Option<u32>, u16)> = jobs.iter().map(|j| (j.question, j.page)).collect();
    std::assert_eq!(summary, vec![(Some(11), 4), (Some(12), 4), (Some(13), 7), (Some(14), 7)]);
    std::assert_eq!(jobs[3].output, Path::new("out/grid/q14.png"));
}

#[test]
fn test_grid_template_without_question_number() {
    let result = CropPlan::from_toml_str(
        r#"
[[batch]]
name = "grid"
document = "grid.pdf"

[batch.grid]
pages = [0]
slots = [[0.0, 0.0, 1.0, 0.5]]
name_template = "out/q.png"
"#,
    );
    std::assert!(matches!(result, Err(ExamError::Config(_))));
}

#[test]
fn test_unknown_template_placeholder() {
    let result = CropPlan::from_toml_str(
        r#"
[[batch]]
name = "grid"
document = "grid.pdf"

[batch.grid]
pages = [0]
slots = [[0.0, 0.0, 1.0, 0.5]]
name_template = "out/{subject}/q{n}.png"
"#,
    );
    std::assert!(matches!(result, Err(ExamError::Config(_))));
}

#[test]
fn test_inverted_rect_is_invalid_region() {
    let plan = LITERAL_PLAN.replace("[0.1, 0.2, 0.9, 0.5]", "[0.9, 0.2, 0.1, 0.5]");
    match CropPlan::from_toml_str(&plan) {
        Err(ExamError::InvalidRegion(msg)) => std::assert!(msg.contains("batch \"sample\"")),
        other => panic!("expected InvalidRegion, got {:?}", other.map(|p| p.batches().len())),
    }
}

#[test]
fn test_output_outside_root_is_rejected() {
    let plan = LITERAL_PLAN.replace("images/sample_q2.png", "../sample_q2.png");
    std::assert!(matches!(CropPlan::from_toml_str(&plan), Err(ExamError::Config(_))));

    let plan = LITERAL_PLAN.replace("images/sample_q2.png", "/tmp/sample_q2.png");
    std::assert!(matches!(CropPlan::from_toml_str(&plan), Err(ExamError::Config(_))));
}

#[test]
fn test_duplicate_output_in_batch() {
    let plan = LITERAL_PLAN.replace("images/sample_page2.png", "images/sample_q2.png");
    std::assert!(matches!(CropPlan::from_toml_str(&plan), Err(ExamError::Config(_))));
}

#[test]
fn test_duplicate_batch_name() {
    let plan = format!("{}\n{}", LITERAL_PLAN, LITERAL_PLAN.replace("images/", "more/"));
    match CropPlan::from_toml_str(&plan) {
        Err(ExamError::Config(msg)) => std::assert!(msg.contains("Duplicate batch name")),
        other => panic!("expected Config error, got {:?}", other.map(|p| p.batches().len())),
    }
}

#[test]
fn test_default_batches_must_not_collide() {
    let second = LITERAL_PLAN
        .replace("name = \"sample\"", "name = \"other\"")
        .replace("images/sample_page2.png", "images/other_page2.png");
    let plan = format!("{}\n{}", LITERAL_PLAN, second);
    std::assert!(matches!(CropPlan::from_toml_str(&plan), Err(ExamError::Config(_))));

    let opt_in = second.replace(
        "document = \"exams/sample.pdf\"",
        "document = \"exams/sample.pdf\"\ndefault = false",
    );
    let plan = CropPlan::from_toml_str(&format!("{}\n{}", LITERAL_PLAN, opt_in)).unwrap();
    std::assert_eq!(plan.select(&[]).unwrap().len(), 1);
}

#[test]
fn test_batch_without_jobs() {
    let result = CropPlan::from_toml_str("[[batch]]\nname = \"empty\"\ndocument = \"x.pdf\"\n");
    std::assert!(matches!(result, Err(ExamError::Config(_))));
}

#[test]
fn test_unknown_field_is_a_config_error() {
    let plan = LITERAL_PLAN.replace("page = 1", "page = 1\nzoom = 4");
    std::assert!(matches!(CropPlan::from_toml_str(&plan), Err(ExamError::Config(_))));
}

#[test]
fn test_missing_plan_file() {
    let result = CropPlan::from_file("does/not/exist.toml");
    std::assert!(matches!(result, Err(ExamError::MissingFile(_))));
}

#[test]
fn test_grid_question_numbers_must_fit() {
    let grid = |first: u32| {
        format!(
            r#"
[[batch]]
name = "late"
document = "late.pdf"

[batch.grid]
pages = [0]
slots = [[0.0, 0.0, 1.0, 0.5], [0.0, 0.5, 1.0, 1.0]]
name_template = "late/q{{n}}.png"
first_question = {}
"#,
            first
        )
    };

    match CropPlan::from_toml_str(&grid(u32::MAX)) {
        Err(ExamError::Config(msg)) => std::assert!(msg.contains("question numbers")),
        other => panic!("expected Config error, got {:?}", other.map(|p| p.batches().len())),
    }

    let plan = CropPlan::from_toml_str(&grid(u32::MAX - 1)).unwrap();
    let questions: Vec<Option<u32>> = plan.batch("late").unwrap().jobs.iter().map(|j| j.question).collect();
    std::assert_eq!(questions, vec![Some(u32::MAX - 1), Some(u32::MAX)]);
}

#[test]
fn test_current_dir_components_are_dropped_from_outputs() {
    let plan = CropPlan::from_toml_str(&LITERAL_PLAN.replace("\"images/sample_q2.png\"", "\"./images/./sample_q2.png\""))
        .unwrap();
    std::assert_eq!(plan.batch("sample").unwrap().jobs[0].output, Path::new("images/sample_q2.png"));

    let second = LITERAL_PLAN
        .replace("name = \"sample\"", "name = \"other\"")
        .replace("\"images/sample_q2.png\"", "\"./images/sample_q2.png\"")
        .replace("images/sample_page2.png", "images/other_page2.png");
    let result = CropPlan::from_toml_str(&format!("{}\n{}", LITERAL_PLAN, second));
    match result {
        Err(ExamError::Config(msg)) => std::assert!(msg.contains("both write")),
        other => panic!("expected Config error, got {:?}", other.map(|p| p.batches().len())),
    }

    let only_dot = LITERAL_PLAN.replace("\"images/sample_q2.png\"", "\".\"");
    std::assert!(matches!(CropPlan::from_toml_str(&only_dot), Err(ExamError::Config(_))));
}
