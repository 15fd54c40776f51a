pub mod errors;
pub mod utils;
pub mod extractor;
pub mod render;
pub mod config;
pub mod batch;
pub mod answer_key;
pub mod commands;

pub use errors::{ExamError, ExamResult};
pub use extractor::{extract, pixel_region, NormalizedRect, Region};
pub use render::{PageRenderer, PdfiumRenderer};
pub use config::{CropBatch, CropJob, CropPlan};
pub use batch::{BatchRunner, JobOutcome, RunReport};
pub use answer_key::{AnswerKey, AnswerKeySpec};
