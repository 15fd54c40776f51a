//! Image extraction command
//!
//! This module implements the command for cropping question diagrams and
//! passages out of exam booklets, one configured batch at a time.

use clap::ArgMatches;
use log::{info, error};
use std::path::PathBuf;

use crate::batch::BatchRunner;
use crate::commands::command_traits::Command;
use crate::config::CropPlan;
use crate::errors::{ExamError, ExamResult};
use crate::render::PdfiumRenderer;
use crate::utils::logger::Logger;

/// Command for cropping configured regions out of exam booklets
pub struct ExtractCommand<'a> {
    /// Crop plan file (built-in plan when absent)
    config_file: Option<PathBuf>,
    /// Batches named on the command line (default batches when empty)
    batch_names: Vec<String>,
    /// Directory the plan's document paths are relative to
    exam_root: PathBuf,
    /// Directory the plan's output paths are relative to
    output_root: PathBuf,
    /// Page magnification
    zoom: f32,
    /// Logger for recording run summaries
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording run summaries
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExamResult<Self> {
        info!("Creating new extract command from arguments");

        let config_file = args.get_one::<String>("config").map(PathBuf::from);
        info!("Crop plan: {:?}", config_file);

        let batch_names: Vec<String> = args
            .get_many::<String>("batch")
            .map(|names| names.cloned().collect())
            .unwrap_or_default();
        info!("Requested batches: {:?}", batch_names);

        let exam_root = args.get_one::<String>("root").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        let output_root = args.get_one::<String>("output").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        info!("Exam root: {}, output root: {}", exam_root.display(), output_root.display());

        let zoom = parse_zoom(args.get_one::<String>("zoom").map(String::as_str))?;
        info!("Zoom factor: {}", zoom);

        Ok(ExtractCommand {
            config_file,
            batch_names,
            exam_root,
            output_root,
            zoom,
            logger,
        })
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> ExamResult<()> {
        let plan = CropPlan::load(self.config_file.as_deref())?;
        let batches = plan.select(&self.batch_names)?;
        let jobs: usize = batches.iter().map(|b| b.jobs.len()).sum();

        println!("Extracting {} images from {} batches...", jobs, batches.len());
        println!("{}", "=".repeat(60));

        let renderer = PdfiumRenderer::with_zoom(self.zoom)?;
        let mut runner = BatchRunner::new(renderer, &self.exam_root, &self.output_root)
            .with_progress(true);
        let report = runner.run(&batches);

        println!("\n{}", "=".repeat(60));
        println!("{}", report);
        self.logger.write_line(&report.to_string())?;

        if report.is_success() {
            println!("All images extracted successfully!");
            Ok(())
        } else {
            error!("{} of {} crop jobs failed", report.failed(), report.total());
            Err(ExamError::GenericError(format!(
                "{} of {} crop jobs failed",
                report.failed(),
                report.total()
            )))
        }
    }
}

/// Parse the `--zoom` value, falling back to the default magnification
fn parse_zoom(raw: Option<&str>) -> ExamResult<f32> {
    let Some(raw) = raw else {
        return Ok(crate::render::DEFAULT_ZOOM);
    };

    match raw.trim().parse::<f32>() {
        Ok(zoom) if zoom.is_finite() && zoom > 0.0 => Ok(zoom),
        _ => Err(ExamError::Config(format!("Invalid zoom factor: {}", raw))),
    }
}
