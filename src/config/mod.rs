//! Crop plan configuration
//!
//! Crop coordinates and page numbers are static data. They live in TOML
//! (built in, or supplied with `--config`) and are validated into
//! [`CropPlan`] before anything is rendered.

mod crop_plan;
#[cfg(test)]
mod tests;

pub use crop_plan::{CropBatch, CropJob, CropPlan, BUILTIN_CROP_PLAN};
