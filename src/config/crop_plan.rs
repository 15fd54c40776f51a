//! Crop plan loading and validation
//!
//! A crop plan is a TOML document of `[[batch]]` tables. Each batch names
//! one document and either lists its crop jobs literally (`[[batch.job]]`)
//! or describes a repeated page layout (`[batch.grid]`) that expands into
//! one job per slot. Everything is validated on load, so a plan that parses
//! only fails at run time for reasons outside the configuration (missing
//! files, short documents, unwritable outputs).

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::errors::{ExamError, ExamResult};
use crate::extractor::NormalizedRect;
use crate::utils::template;

/// Crop tables for the exam booklets, embedded at build time
pub const BUILTIN_CROP_PLAN: &str = include_str!("../../config/crop_jobs.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    #[serde(default, rename = "batch")]
    batches: Vec<BatchEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchEntry {
    name: String,
    title: Option<String>,
    document: PathBuf,
    #[serde(default = "default_enabled")]
    default: bool,
    #[serde(default, rename = "job")]
    jobs: Vec<JobEntry>,
    grid: Option<GridEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobEntry {
    question: Option<u32>,
    page: u16,
    rect: [f64; 4],
    output: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridEntry {
    pages: Vec<u16>,
    slots: Vec<[f64; 4]>,
    name_template: String,
    #[serde(default = "default_first_question")]
    first_question: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_first_question() -> u32 {
    1
}

/// One configured extraction: a page, a rectangle on it, and an output name
#[derive(Debug, Clone, PartialEq)]
pub struct CropJob {
    /// Question the crop belongs to, used for progress lines
    pub question: Option<u32>,
    /// 0-based page index in the batch document
    pub page: u16,
    pub rect: NormalizedRect,
    /// Output path relative to the output root
    pub output: PathBuf,
}

impl CropJob {
    /// Short name for progress lines and reports
    pub fn label(&self) -> String {
        match self.question {
            Some(q) => format!("Q{}", q),
            None => self
                .output
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.output.display().to_string()),
        }
    }
}

/// A named group of crop jobs over a single document
#[derive(Debug, Clone)]
pub struct CropBatch {
    pub name: String,
    pub title: String,
    /// Document path relative to the exam root
    pub document: PathBuf,
    /// Whether the batch runs when no batch is named explicitly
    pub default: bool,
    pub jobs: Vec<CropJob>,
}

/// Validated set of crop batches
#[derive(Debug, Clone)]
pub struct CropPlan {
    batches: Vec<CropBatch>,
}

impl CropPlan {
    /// The plan compiled into the binary
    pub fn builtin() -> ExamResult<Self> {
        Self::from_toml_str(BUILTIN_CROP_PLAN)
    }

    /// Load the plan at `path`, or the built-in plan when no path is given
    pub fn load(path: Option<&Path>) -> ExamResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                info!("Using built-in crop plan");
                Self::builtin()
            }
        }
    }

    /// Load a plan from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ExamResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExamError::MissingFile(path.to_path_buf()));
        }

        info!("Loading crop plan from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a plan from TOML text
    pub fn from_toml_str(content: &str) -> ExamResult<Self> {
        let file: PlanFile = toml::from_str(content)?;

        let mut names = HashSet::new();
        let mut batches = Vec::with_capacity(file.batches.len());
        for entry in file.batches {
            if !names.insert(entry.name.clone()) {
                return Err(ExamError::Config(format!("Duplicate batch name \"{}\"", entry.name)));
            }
            batches.push(build_batch(entry)?);
        }

        if batches.is_empty() {
            return Err(ExamError::Config("Crop plan defines no batches".to_string()));
        }

        let defaults: Vec<&CropBatch> = batches.iter().filter(|b| b.default).collect();
        check_disjoint_outputs(&defaults)?;

        debug!(
            "Crop plan has {} batches ({} jobs)",
            batches.len(),
            batches.iter().map(|b| b.jobs.len()).sum::<usize>()
        );
        Ok(CropPlan { batches })
    }

    /// All batches in configuration order
    pub fn batches(&self) -> &[CropBatch] {
        &self.batches
    }

    /// Look up a batch by name
    pub fn batch(&self, name: &str) -> Option<&CropBatch> {
        self.batches.iter().find(|b| b.name == name)
    }

    /// Pick the batches to run
    ///
    /// With no `names`, every default batch is selected. Named batches are
    /// returned in plan order whether or not they are defaults.
    ///
    /// # Returns
    /// The selected batches, or a `Config` error for an unknown name or for
    /// a selection in which two jobs would write the same file
    pub fn select(&self, names: &[String]) -> ExamResult<Vec<&CropBatch>> {
        if let Some(unknown) = names.iter().find(|name| self.batch(name).is_none()) {
            let known: Vec<&str> = self.batches.iter().map(|b| b.name.as_str()).collect();
            return Err(ExamError::Config(format!(
                "Unknown batch \"{}\" (available: {})",
                unknown,
                known.join(", ")
            )));
        }

        let selected: Vec<&CropBatch> = self
            .batches
            .iter()
            .filter(|b| {
                if names.is_empty() {
                    b.default
                } else {
                    names.iter().any(|n| *n == b.name)
                }
            })
            .collect();

        check_disjoint_outputs(&selected)?;
        Ok(selected)
    }
}

fn build_batch(entry: BatchEntry) -> ExamResult<CropBatch> {
    let context = format!("batch \"{}\"", entry.name);

    let jobs = match (entry.jobs.is_empty(), entry.grid) {
        (false, Some(_)) => {
            return Err(ExamError::Config(format!(
                "{} declares both literal jobs and a grid",
                context
            )))
        }
        (true, None) => {
            return Err(ExamError::Config(format!("{} has no jobs", context)));
        }
        (true, Some(grid)) => expand_grid(&entry.name, grid)?,
        (false, None) => entry
            .jobs
            .into_iter()
            .map(|job| build_job(&context, job))
            .collect::<ExamResult<Vec<_>>>()?,
    };

    let mut outputs = HashSet::new();
    for job in &jobs {
        if !outputs.insert(&job.output) {
            return Err(ExamError::Config(format!(
                "{} writes {} more than once",
                context,
                job.output.display()
            )));
        }
    }

    Ok(CropBatch {
        title: entry.title.unwrap_or_else(|| entry.name.clone()),
        name: entry.name,
        document: entry.document,
        default: entry.default,
        jobs,
    })
}

fn build_job(context: &str, job: JobEntry) -> ExamResult<CropJob> {
    let rect = NormalizedRect::from_array(job.rect).map_err(|e| in_context(context, e))?;
    let output = output_path(context, &job.output)?;

    Ok(CropJob {
        question: job.question,
        page: job.page,
        rect,
        output,
    })
}

fn expand_grid(batch: &str, grid: GridEntry) -> ExamResult<Vec<CropJob>> {
    let context = format!("grid of batch \"{}\"", batch);
    template::require_placeholder(&grid.name_template, "n").map_err(|e| in_context(&context, e))?;

    let slots = grid
        .slots
        .iter()
        .map(|slot| NormalizedRect::from_array(*slot))
        .collect::<ExamResult<Vec<_>>>()
        .map_err(|e| in_context(&context, e))?;

    if grid.pages.is_empty() || slots.is_empty() {
        return Err(ExamError::Config(format!("{} needs at least one page and one slot", context)));
    }

    let mut jobs = Vec::with_capacity(grid.pages.len() * slots.len());
    let mut next_question = Some(grid.first_question);
    for &page in &grid.pages {
        for rect in &slots {
            let question = next_question.ok_or_else(|| {
                ExamError::Config(format!("{}: question numbers run past {}", context, u32::MAX))
            })?;
            let n = question.to_string();
            let name = template::expand(&grid.name_template, &[("n", n.as_str()), ("batch", batch)])?;
            jobs.push(CropJob {
                question: Some(question),
                page,
                rect: *rect,
                output: output_path(&context, &name)?,
            });
            next_question = question.checked_add(1);
        }
    }

    Ok(jobs)
}

// Outputs must stay under the output root. `.` components are dropped so
// equal files compare equal.
fn output_path(context: &str, raw: &str) -> ExamResult<PathBuf> {
    let raw_path = Path::new(raw);
    let escapes = raw_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    let path: PathBuf = raw_path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    if path.as_os_str().is_empty() || escapes {
        return Err(ExamError::Config(format!(
            "{}: output \"{}\" must be a relative path inside the output directory",
            context, raw
        )));
    }
    Ok(path)
}

fn check_disjoint_outputs(batches: &[&CropBatch]) -> ExamResult<()> {
    let mut owners: HashMap<&Path, &str> = HashMap::new();
    for batch in batches {
        for job in &batch.jobs {
            if let Some(owner) = owners.insert(job.output.as_path(), &batch.name) {
                if owner != batch.name {
                    return Err(ExamError::Config(format!(
                        "Batches \"{}\" and \"{}\" both write {}",
                        owner,
                        batch.name,
                        job.output.display()
                    )));
                }
            }
        }
    }
    Ok(())
}

fn in_context(context: &str, error: ExamError) -> ExamError {
    match error {
        ExamError::InvalidRegion(msg) => ExamError::InvalidRegion(format!("{}: {}", context, msg)),
        other => other,
    }
}
