//! Batch driver for crop jobs

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use log::{debug, info};

use crate::config::{CropBatch, CropJob};
use crate::errors::{ExamError, ExamResult};
use crate::extractor;
use crate::render::PageRenderer;
use crate::utils::progress::ProgressTracker;
use crate::utils::write_utils;

use super::report::{JobOutcome, RunReport};

/// The most recently rendered page, reused by consecutive jobs on it
struct RenderedPage {
    document: PathBuf,
    page: u16,
    bitmap: DynamicImage,
}

/// Runs crop batches against a page renderer and writes the results
///
/// Documents are resolved against `exam_root`, outputs against
/// `output_root`. A failing job is recorded in the report and the run moves
/// on to the next job.
pub struct BatchRunner<R: PageRenderer> {
    renderer: R,
    exam_root: PathBuf,
    output_root: PathBuf,
    show_progress: bool,
    last_page: Option<RenderedPage>,
}

impl<R: PageRenderer> BatchRunner<R> {
    /// Create a runner; the progress bar is off until enabled
    pub fn new(renderer: R, exam_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        BatchRunner {
            renderer,
            exam_root: exam_root.into(),
            output_root: output_root.into(),
            show_progress: false,
            last_page: None,
        }
    }

    /// Draw an indicatif progress bar while running
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run every job of `batches` in order
    pub fn run(&mut self, batches: &[&CropBatch]) -> RunReport {
        let total: usize = batches.iter().map(|b| b.jobs.len()).sum();
        let progress = if self.show_progress {
            ProgressTracker::new(total as u64, "Cropping")
        } else {
            ProgressTracker::hidden(total as u64)
        };

        info!("Running {} crop jobs from {} batches", total, batches.len());
        let mut report = RunReport::new();

        for batch in batches {
            let document = self.exam_root.join(&batch.document);
            progress.println(&format!("\n{}: {}", batch.title.to_uppercase(), document.display()));
            progress.println(&"-".repeat(60));
            progress.set_message(&batch.name);

            for job in &batch.jobs {
                let output = self.output_root.join(&job.output);
                let result = self.run_job(&document, job, &output);

                match &result {
                    Ok(_) => progress.println(&format!("  ✓ {}: {}", job.label(), output.display())),
                    Err(e) => {
                        info!("[{}] {} failed: {}", batch.name, job.label(), e);
                        progress.println(&format!("  ✗ {}: {}", job.label(), e));
                    }
                }

                report.push(JobOutcome {
                    batch: batch.name.clone(),
                    label: job.label(),
                    output,
                    result,
                });
                progress.increment(1);
            }
        }

        progress.finish();
        self.last_page = None;
        info!("{}", report);
        report
    }

    /// Render, crop and write a single job
    ///
    /// # Returns
    /// The dimensions of the written image
    pub fn run_job(&mut self, document: &Path, job: &CropJob, output: &Path) -> ExamResult<(u32, u32)> {
        let page = self.page(document, job.page)?;
        let cropped = extractor::extract(page, &job.rect)?;
        write_utils::write_png(&cropped, output)?;
        Ok(cropped.dimensions())
    }

    fn page(&mut self, document: &Path, page: u16) -> ExamResult<&DynamicImage> {
        let cached = matches!(
            &self.last_page,
            Some(last) if last.document == document && last.page == page
        );

        if !cached {
            self.last_page = None;
            let bitmap = self.renderer.render_page(document, page)?;
            debug!(
                "Rendered page {} of {} ({}x{})",
                page,
                document.display(),
                bitmap.width(),
                bitmap.height()
            );
            self.last_page = Some(RenderedPage {
                document: document.to_path_buf(),
                page,
                bitmap,
            });
        }

        self.last_page
            .as_ref()
            .map(|last| &last.bitmap)
            .ok_or_else(|| ExamError::GenericError("Rendered page cache is empty".to_string()))
    }
}
