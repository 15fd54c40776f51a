//! Tests for the crop plan compiled into the binary

extern crate std;

use std::path::Path;

use crate::config::CropPlan;
use crate::errors::ExamError;
use crate::extractor::NormalizedRect;

#[test]
fn test_builtin_plan_loads() {
    let plan = CropPlan::builtin().unwrap();
    let counts: Vec<(&str, usize)> = plan
        .batches()
        .iter()
        .map(|b| (b.name.as_str(), b.jobs.len()))
        .collect();

    std::assert_eq!(
        counts,
        vec![
            ("maths1", 19),
            ("maths2", 10),
            ("verbal1", 2),
            ("english2-passage", 2),
            ("nvr1", 80),
            ("nvr2", 80),
            ("nvr3", 80),
            ("maths1-page4-preview", 2),
        ]
    );
}

#[test]
fn test_builtin_maths1_first_job() {
    let plan = CropPlan::builtin().unwrap();
    let maths1 = plan.batch("maths1").unwrap();
    std::assert_eq!(maths1.document, Path::new("exams/Maths/Maths_1_Test Booklet.pdf"));

    let q4 = &maths1.jobs[0];
    std::assert_eq!(q4.question, Some(4));
    std::assert_eq!(q4.page, 3);
    std::assert_eq!(q4.rect, NormalizedRect::new(0.30, 0.08, 0.76, 0.38).unwrap());
    std::assert_eq!(q4.output, Path::new("images/maths_q4_grid.png"));
    std::assert_eq!(q4.label(), "Q4");
}

#[test]
fn test_builtin_grid_places_question_45() {
    let plan = CropPlan::builtin().unwrap();
    let nvr1 = plan.batch("nvr1").unwrap();

    let q45 = &nvr1.jobs[44];
    std::assert_eq!(q45.question, Some(45));
    std::assert_eq!(q45.page, 15);
    std::assert_eq!(q45.rect, NormalizedRect::new(0.0, 0.72, 1.0, 0.88).unwrap());
    std::assert_eq!(q45.output, Path::new("images/non-verbal-reasoning/test1/q45.png"));

    let last = nvr1.jobs.last().unwrap();
    std::assert_eq!((last.question, last.page), (Some(80), 24));
}

#[test]
fn test_default_selection_skips_preview() {
    let plan = CropPlan::builtin().unwrap();
    let selected = plan.select(&[]).unwrap();
    std::assert_eq!(selected.len(), 7);
    std::assert!(selected.iter().all(|b| b.name != "maths1-page4-preview"));
}

#[test]
fn test_preview_runs_when_named() {
    let plan = CropPlan::builtin().unwrap();
    let selected = plan.select(&["maths1-page4-preview".to_string()]).unwrap();
    std::assert_eq!(selected.len(), 1);
    std::assert_eq!(selected[0].jobs[1].label(), "maths_page4_full.png");
    std::assert_eq!(selected[0].jobs[1].rect, NormalizedRect::full_page());
}

#[test]
fn test_selecting_both_q4_versions_is_rejected() {
    let plan = CropPlan::builtin().unwrap();
    let names = vec!["maths1".to_string(), "maths1-page4-preview".to_string()];
    match plan.select(&names) {
        Err(ExamError::Config(msg)) => std::assert!(msg.contains("maths_q4_grid.png")),
        other => panic!("expected Config error, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_unknown_batch_is_rejected() {
    let plan = CropPlan::builtin().unwrap();
    let result = plan.select(&["chemistry".to_string()]);
    std::assert!(matches!(result, Err(ExamError::Config(_))));
}
