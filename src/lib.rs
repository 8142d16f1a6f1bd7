//! simreport - comparative chart reports for kernel simulation results.
//!
//! Four chart builders turn fixed metric datasets (page replacement, disk
//! scheduling, CPU scheduling) into [`ChartArtifact`]s; the
//! [`ReportGenerator`] runs them in order and writes the images.

pub mod artifact;
pub mod charts;
pub mod datasets;
pub mod error;
pub mod model;
pub mod report;
pub mod style;

pub use artifact::{ChartArtifact, Figure, OutputFormat};
pub use error::{ReportError, Result, StepFailure};
pub use model::{AlgorithmDataset, Annotation, DerivedMetric, MetricSeries};
pub use report::{default_steps, ReportGenerator, ReportStep};
pub use style::{ChartStyle, FigureGeometry};
