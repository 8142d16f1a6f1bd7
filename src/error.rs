//! Error types for chart building and report generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;

/// Failures a chart builder or artifact writer can raise
#[derive(Error, Debug)]
pub enum ReportError {
    /// Category axes that must align do not (length or content)
    #[error("data shape mismatch in {chart}: {detail}")]
    DataShape {
        /// Chart whose inputs disagree
        chart: &'static str,
        /// What differs
        detail: String,
    },

    /// A series or dataset violates its own construction rules
    #[error("invalid data in '{subject}': {detail}")]
    InvalidData {
        /// Series or dataset name
        subject: String,
        /// Violated rule
        detail: String,
    },

    /// A scalar metric lies outside its valid range
    #[error("{metric} for '{algorithm}' is {value}, outside the valid range [{min}, {max}]")]
    DomainRange {
        metric: &'static str,
        algorithm: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A derived metric cannot be computed from its baseline
    #[error("cannot derive {metric}: baseline '{baseline}' {reason}")]
    UndefinedDerivedMetric {
        metric: &'static str,
        baseline: String,
        reason: String,
    },

    /// Plotters failed while drawing, before anything was persisted
    #[error("failed to render {file}: {reason}")]
    Render { file: String, reason: String },

    /// The rendered image could not be written
    #[error("failed to write {}: {reason}", path.display())]
    ArtifactWrite { path: PathBuf, reason: String },
}

impl ReportError {
    /// Short name of the error class, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::DataShape { .. } | ReportError::InvalidData { .. } => "data-shape",
            ReportError::DomainRange { .. } => "domain-range",
            ReportError::UndefinedDerivedMetric { .. } => "undefined-derived-metric",
            ReportError::Render { .. } => "render",
            ReportError::ArtifactWrite { .. } => "artifact-write",
        }
    }
}

/// A report step that failed, annotated with its position in the run
#[derive(Error, Debug)]
#[error("[{step}/{total}] {description} failed: {source}")]
pub struct StepFailure {
    pub step: usize,
    pub total: usize,
    pub description: String,
    #[source]
    pub source: ReportError,
}
