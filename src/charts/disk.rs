//! Disk head movement per scheduling algorithm, with a second panel showing
//! each algorithm's improvement over the baseline (the first entry).

use super::{
    category_range, draw_bar_labels, draw_bars, draw_mesh, draw_title, headroom, Bar, DrawResult,
    LabelSide, MeshSpec,
};
use crate::artifact::{ChartArtifact, Figure};
use crate::error::{ReportError, Result};
use crate::model::{format_signed_percent, relative_improvement, AlgorithmDataset, DerivedMetric};
use crate::style::{ChartStyle, FigureGeometry};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use tracing::debug;

pub const FILE_STEM: &str = "disk_comparativa";

const CHART: &str = "disk movement";
const BAR_WIDTH: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct DiskMovementInput {
    pub title: String,
    pub movement_title: String,
    pub movement_desc: String,
    pub improvement_title: String,
    pub improvement_desc: String,
    /// Appended under each movement value, e.g. "cylinders"
    pub unit: String,
    /// Algorithm → total head movement; the first entry is the baseline
    pub movements: AlgorithmDataset<u64>,
}

/// One side of the two-panel figure
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub y_desc: String,
    pub y_range: Range<f64>,
    pub bars: Vec<Bar>,
    /// Dashed horizontal reference at zero
    pub zero_line: bool,
}

/// Resolved disk-movement figure
#[derive(Debug, Clone, PartialEq)]
pub struct DiskMovementChart {
    pub title: String,
    pub categories: Vec<String>,
    pub baseline: String,
    pub improvements: Vec<DerivedMetric>,
    pub movement: Panel,
    pub improvement: Panel,
}

pub fn build(input: &DiskMovementInput, style: &ChartStyle) -> Result<ChartArtifact> {
    let baseline = match input.movements.first() {
        Some((name, _)) => name.to_string(),
        None => {
            return Err(ReportError::DataShape {
                chart: CHART,
                detail: "no algorithms to compare".to_string(),
            })
        }
    };

    // Rejects a zero baseline before any bar is laid out
    let improvements = relative_improvement(&input.movements, &baseline)?;

    let movement_bars: Vec<Bar> = input
        .movements
        .iter()
        .enumerate()
        .map(|(i, (name, &distance))| Bar {
            category: name.to_string(),
            center: i as f64,
            width: BAR_WIDTH,
            value: distance as f64,
            label: format!("{}\n{}", distance, input.unit),
            side: LabelSide::Above,
            color: i,
        })
        .collect();

    let improvement_bars: Vec<Bar> = improvements
        .iter()
        .enumerate()
        .map(|(i, metric)| Bar {
            category: metric.algorithm.clone(),
            center: i as f64,
            width: BAR_WIDTH,
            value: metric.value,
            label: format_signed_percent(metric.value),
            side: if metric.value < 0.0 {
                LabelSide::Below
            } else {
                LabelSide::Above
            },
            color: i,
        })
        .collect();

    let max_distance = movement_bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);

    debug!(
        baseline = baseline.as_str(),
        algorithms = movement_bars.len(),
        "disk movement chart resolved"
    );

    let chart = DiskMovementChart {
        title: input.title.clone(),
        categories: input.movements.names().map(str::to_string).collect(),
        baseline,
        movement: Panel {
            title: input.movement_title.clone(),
            y_desc: input.movement_desc.clone(),
            y_range: 0.0..headroom(max_distance, 1.25),
            bars: movement_bars,
            zero_line: false,
        },
        improvement: Panel {
            title: input.improvement_title.clone(),
            y_desc: input.improvement_desc.clone(),
            y_range: improvement_range(&improvements),
            bars: improvement_bars,
            zero_line: true,
        },
        improvements,
    };

    Ok(ChartArtifact::new(
        FILE_STEM,
        FigureGeometry::dual_panel(),
        style.clone(),
        Figure::DiskMovement(chart),
    ))
}

/// Symmetric padding around [min(0, lo), max(0, hi)] so labels on both
/// sides of the zero line stay inside the panel
fn improvement_range(improvements: &[DerivedMetric]) -> Range<f64> {
    let lo = improvements.iter().map(|m| m.value).fold(0.0_f64, f64::min);
    let hi = improvements.iter().map(|m| m.value).fold(0.0_f64, f64::max);
    let pad = ((hi - lo) * 0.2).max(5.0);
    (lo - pad)..(hi + pad)
}

/// Dash segments `(from, to)` covering `range`, `dash` long with `gap` between
fn dashes(range: &Range<f64>, start: f64, dash: f64, gap: f64) -> impl Iterator<Item = (f64, f64)> {
    let (lo, hi) = (range.start, range.end);
    let step = dash + gap;
    let count = ((hi - lo - start) / step).ceil().max(0.0) as usize;
    (0..count).map(move |i| {
        let from = lo + start + i as f64 * step;
        (from, (from + dash).min(hi))
    })
}

impl DiskMovementChart {
    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
        geometry: &FigureGeometry,
    ) -> DrawResult<(), DB> {
        let area = draw_title(root, &self.title, style.title_size_pt, style, geometry)?;
        let panels = area.split_evenly((1, 2));

        for (panel, target) in [&self.movement, &self.improvement].into_iter().zip(&panels) {
            self.draw_panel(panel, target, style, geometry)?;
        }

        Ok(())
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        panel: &Panel,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
        geometry: &FigureGeometry,
    ) -> DrawResult<(), DB> {
        let area = draw_title(area, &panel.title, style.title_size_pt - 1.0, style, geometry)?;
        let x_range = category_range(self.categories.len());

        let mut plot = ChartBuilder::on(&area)
            .margin(geometry.px_u32(8.0))
            .x_label_area_size(geometry.px_u32(24.0))
            .y_label_area_size(geometry.px_u32(44.0))
            .build_cartesian_2d(x_range.clone(), panel.y_range.clone())?;

        draw_mesh(
            &mut plot,
            &MeshSpec {
                categories: &self.categories,
                x_desc: None,
                y_desc: &panel.y_desc,
                x_grid: false,
            },
            style,
            geometry,
        )?;

        draw_bars(&mut plot, &panel.bars, style, geometry)?;

        if panel.zero_line {
            let line = BLACK.mix(0.5).stroke_width(geometry.px_u32(1.0));
            plot.draw_series(dashes(&x_range, 0.0, 0.12, 0.06).map(|(from, to)| {
                PathElement::new(vec![(from, 0.0), (to, 0.0)], line)
            }))?;
        }

        draw_bar_labels(&mut plot, &panel.bars, style, geometry)
    }
}
