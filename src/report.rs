//! Report orchestration: run the chart steps in order, write each artifact,
//! and stop at the first failure.

use crate::artifact::{ChartArtifact, OutputFormat};
use crate::charts::{disk, faults, hit_rate, scheduler};
use crate::datasets;
use crate::error::{Result, StepFailure};
use crate::style::ChartStyle;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type BuildFn = Box<dyn Fn() -> Result<ChartArtifact>>;

/// One numbered step of the report
pub struct ReportStep {
    description: String,
    build: BuildFn,
}

impl ReportStep {
    pub fn new(description: impl Into<String>, build: impl Fn() -> Result<ChartArtifact> + 'static) -> Self {
        Self {
            description: description.into(),
            build: Box::new(build),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// The four report charts in their fixed order
pub fn default_steps() -> Vec<ReportStep> {
    vec![
        ReportStep::new("Page faults vs. frames", || {
            faults::build(&datasets::page_faults()?, &ChartStyle::fault_curve())
        }),
        ReportStep::new("Hit rate", || {
            hit_rate::build(&datasets::hit_rates()?, &ChartStyle::hit_rate())
        }),
        ReportStep::new("Disk scheduling", || {
            disk::build(&datasets::disk_movement()?, &ChartStyle::disk_movement())
        }),
        ReportStep::new("Scheduling metrics", || {
            scheduler::build(&datasets::scheduler_metrics()?, &ChartStyle::scheduler())
        }),
    ]
}

pub struct ReportGenerator {
    output_dir: PathBuf,
    format: OutputFormat,
    steps: Vec<ReportStep>,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            steps: default_steps(),
        }
    }

    /// Replace the default steps
    pub fn with_steps(mut self, steps: Vec<ReportStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run every step in order, writing progress to `out`.
    ///
    /// Returns the written paths in step order. The first failing step
    /// ends the run; artifacts written before it stay on disk.
    pub fn run<W: Write>(&self, out: &mut W) -> std::result::Result<Vec<PathBuf>, StepFailure> {
        let total = self.steps.len();
        let mut written = Vec::with_capacity(total);

        // Console lines are best effort; a closed stdout must not fail the run
        let _ = writeln!(out, "Generating charts...\n");

        for (idx, step) in self.steps.iter().enumerate() {
            let number = idx + 1;
            let _ = writeln!(out, "[{}/{}] {}...", number, total, step.description);

            let outcome = (step.build)().and_then(|artifact| artifact.write_to(&self.output_dir, self.format));
            match outcome {
                Ok(path) => {
                    let name = file_name(&path);
                    info!(step = number, total, file = name.as_str(), "chart saved");
                    let _ = writeln!(out, "Chart saved: {}\n", name);
                    written.push(path);
                }
                Err(source) => {
                    // The binary prints the failure once; keep the event below warn
                    debug!(
                        step = number,
                        total,
                        kind = source.kind(),
                        error = %source,
                        "report step failed"
                    );
                    return Err(StepFailure {
                        step: number,
                        total,
                        description: step.description.clone(),
                        source,
                    });
                }
            }
        }

        let _ = writeln!(out, "All charts generated successfully!");
        let _ = writeln!(out, "\nFiles created:");
        for path in &written {
            let _ = writeln!(out, "  - {}", file_name(path));
        }

        Ok(written)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
