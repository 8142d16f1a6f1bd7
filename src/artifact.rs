//! Rendered chart values and their persistence.
//!
//! A [`ChartArtifact`] is produced by a builder and never mutated. Drawing
//! works against any plotters backend, so the same artifact can be written
//! as PNG, rendered to an SVG string for tests, or handed to a viewer.

use crate::charts::disk::DiskMovementChart;
use crate::charts::faults::FaultCurveChart;
use crate::charts::hit_rate::HitRateChart;
use crate::charts::scheduler::SchedulerChart;
use crate::charts::{Bar, DrawResult};
use crate::error::{ReportError, Result};
use crate::style::{ChartStyle, FigureGeometry};
use clap::ValueEnum;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Image encoding of a written artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Fully resolved chart content, one variant per report figure
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    FaultCurve(FaultCurveChart),
    HitRate(HitRateChart),
    DiskMovement(DiskMovementChart),
    Scheduler(SchedulerChart),
}

impl Figure {
    fn bars(&self) -> Vec<&Bar> {
        match self {
            Figure::FaultCurve(_) => Vec::new(),
            Figure::HitRate(chart) => chart.bars.iter().collect(),
            Figure::DiskMovement(chart) => chart
                .movement
                .bars
                .iter()
                .chain(&chart.improvement.bars)
                .collect(),
            Figure::Scheduler(chart) => chart.bars.iter().collect(),
        }
    }
}

/// One chart, bound to its file stem and figure geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    stem: &'static str,
    geometry: FigureGeometry,
    style: ChartStyle,
    figure: Figure,
}

impl ChartArtifact {
    pub(crate) fn new(
        stem: &'static str,
        geometry: FigureGeometry,
        style: ChartStyle,
        figure: Figure,
    ) -> Self {
        Self {
            stem,
            geometry,
            style,
            figure,
        }
    }

    pub fn stem(&self) -> &'static str {
        self.stem
    }

    pub fn geometry(&self) -> &FigureGeometry {
        &self.geometry
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// `<stem>.<ext>`, fixed per chart
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("{}.{}", self.stem, format.extension())
    }

    /// Every bar's value label, in drawing order
    pub fn value_labels(&self) -> Vec<&str> {
        self.figure
            .bars()
            .into_iter()
            .map(|bar| bar.label.as_str())
            .collect()
    }

    /// Text of every callout, in drawing order
    pub fn callout_texts(&self) -> Vec<&str> {
        match &self.figure {
            Figure::FaultCurve(chart) => vec![chart.callout.text.as_str()],
            Figure::Scheduler(chart) => chart.callouts.iter().map(|c| c.text.as_str()).collect(),
            Figure::HitRate(_) | Figure::DiskMovement(_) => Vec::new(),
        }
    }

    /// Draw the figure onto a backend's root area
    pub(crate) fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;
        match &self.figure {
            Figure::FaultCurve(chart) => chart.draw(root, &self.style, &self.geometry),
            Figure::HitRate(chart) => chart.draw(root, &self.style, &self.geometry),
            Figure::DiskMovement(chart) => chart.draw(root, &self.style, &self.geometry),
            Figure::Scheduler(chart) => chart.draw(root, &self.style, &self.geometry),
        }
    }

    /// Render to an in-memory SVG document
    pub fn render_svg(&self) -> Result<String> {
        let file = self.file_name(OutputFormat::Svg);
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.geometry.pixel_size())
                .into_drawing_area();
            self.draw(&root).map_err(|e| ReportError::Render {
                file: file.clone(),
                reason: e.to_string(),
            })?;
            root.present().map_err(|e| ReportError::Render {
                file: file.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(buffer)
    }

    /// Write the artifact into `dir`, creating it if needed, and return
    /// the written path. An existing file of the same name is replaced.
    pub fn write_to(&self, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| ReportError::ArtifactWrite {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let path = dir.join(self.file_name(format));
        let size = self.geometry.pixel_size();
        debug!(path = %path.display(), width = size.0, height = size.1, "rendering artifact");

        match format {
            OutputFormat::Png => self.persist(BitMapBackend::new(&path, size).into_drawing_area(), &path)?,
            OutputFormat::Svg => self.persist(SVGBackend::new(&path, size).into_drawing_area(), &path)?,
        }

        info!(path = %path.display(), "artifact written");
        Ok(path)
    }

    fn persist<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>, path: &Path) -> Result<()> {
        if let Err(e) = self.draw(&root) {
            // Dropping the backend may flush what was drawn so far
            drop(root);
            if let Err(rm) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %rm, "could not remove partial artifact");
            }
            return Err(ReportError::Render {
                file: path.display().to_string(),
                reason: e.to_string(),
            });
        }

        root.present().map_err(|e| ReportError::ArtifactWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
