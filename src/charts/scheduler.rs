//! Grouped scheduler metrics: one bar per algorithm at each metric
//! category, with one editorial callout per category.

use super::{
    category_range, draw_bar_labels, draw_bars, draw_callouts, draw_legend, draw_mesh, draw_title,
    headroom, legend_swatch_px, resolve_callout, Bar, Callout, CalloutAlign, DrawResult, LabelSide,
    MeshSpec,
};
use crate::artifact::{ChartArtifact, Figure};
use crate::error::{ReportError, Result};
use crate::model::{ensure_same_axis, format_one_decimal, Annotation, MetricSeries};
use crate::style::{ChartStyle, FigureGeometry};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::HashSet;
use tracing::debug;

pub const FILE_STEM: &str = "scheduler_comparativa";

const CHART: &str = "scheduler metrics";

/// Width of a single bar inside its group
pub const DEFAULT_BAR_WIDTH: f64 = 0.35;

#[derive(Debug, Clone)]
pub struct SchedulerInput {
    pub title: String,
    pub y_desc: String,
    /// One series per algorithm, labels are the metric categories
    pub series: Vec<MetricSeries>,
    /// Exactly one callout per category
    pub callouts: Vec<Annotation>,
    pub bar_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: usize,
}

/// Resolved grouped-bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerChart {
    pub title: String,
    pub y_desc: String,
    pub categories: Vec<String>,
    /// Grouped by category, then by algorithm
    pub bars: Vec<Bar>,
    pub legend: Vec<LegendEntry>,
    pub callouts: Vec<Callout>,
    pub y_max: f64,
}

/// Offset of the `j`-th of `n` bars from its category center
fn group_offset(j: usize, n: usize, width: f64) -> f64 {
    (j as f64 - (n as f64 - 1.0) / 2.0) * width
}

pub fn build(input: &SchedulerInput, style: &ChartStyle) -> Result<ChartArtifact> {
    let first = match input.series.as_slice() {
        [first, rest @ ..] if !rest.is_empty() => first,
        _ => {
            return Err(ReportError::DataShape {
                chart: CHART,
                detail: format!("needs at least two algorithms, got {}", input.series.len()),
            })
        }
    };
    for other in &input.series[1..] {
        ensure_same_axis(CHART, first, other)?;
    }

    let categories = first.labels().to_vec();
    check_callouts(&input.callouts, &categories)?;

    let n = input.series.len();
    let mut bars = Vec::with_capacity(categories.len() * n);
    for (i, category) in categories.iter().enumerate() {
        for (j, series) in input.series.iter().enumerate() {
            let value = series.samples()[i];
            bars.push(Bar {
                category: category.clone(),
                center: i as f64 + group_offset(j, n, input.bar_width),
                width: input.bar_width,
                value,
                label: format_one_decimal(value),
                side: LabelSide::Above,
                color: j,
            });
        }
    }

    let tallest = |idx: usize| {
        input
            .series
            .iter()
            .map(|s| s.samples()[idx])
            .fold(f64::MIN, f64::max)
    };
    let callouts = input
        .callouts
        .iter()
        .map(|a| resolve_callout(CHART, a, &categories, &tallest, CalloutAlign::Center, false))
        .collect::<Result<Vec<_>>>()?;

    let data_max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let callout_max = callouts.iter().map(|c| c.at.1).fold(0.0_f64, f64::max);
    let y_max = headroom(data_max.max(callout_max), 1.15);

    debug!(
        categories = categories.len(),
        algorithms = n,
        bars = bars.len(),
        y_max,
        "scheduler chart resolved"
    );

    let chart = SchedulerChart {
        title: input.title.clone(),
        y_desc: input.y_desc.clone(),
        legend: input
            .series
            .iter()
            .enumerate()
            .map(|(j, s)| LegendEntry {
                name: s.name().to_string(),
                color: j,
            })
            .collect(),
        categories,
        bars,
        callouts,
        y_max,
    };

    Ok(ChartArtifact::new(
        FILE_STEM,
        FigureGeometry::wide_panel(),
        style.clone(),
        Figure::Scheduler(chart),
    ))
}

fn check_callouts(callouts: &[Annotation], categories: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for callout in callouts {
        if !seen.insert(callout.category.as_str()) {
            return Err(ReportError::DataShape {
                chart: CHART,
                detail: format!("more than one callout for '{}'", callout.category),
            });
        }
    }

    if let Some(missing) = categories.iter().find(|c| !seen.contains(c.as_str())) {
        return Err(ReportError::DataShape {
            chart: CHART,
            detail: format!("no callout for '{}'", missing),
        });
    }

    Ok(())
}

impl SchedulerChart {
    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
        geometry: &FigureGeometry,
    ) -> DrawResult<(), DB> {
        let area = draw_title(root, &self.title, style.title_size_pt, style, geometry)?;

        let mut plot = ChartBuilder::on(&area)
            .margin(geometry.px_u32(10.0))
            .x_label_area_size(geometry.px_u32(24.0))
            .y_label_area_size(geometry.px_u32(40.0))
            .build_cartesian_2d(category_range(self.categories.len()), 0.0..self.y_max)?;

        draw_mesh(
            &mut plot,
            &MeshSpec {
                categories: &self.categories,
                x_desc: None,
                y_desc: &self.y_desc,
                x_grid: false,
            },
            style,
            geometry,
        )?;

        draw_bars(&mut plot, &self.bars, style, geometry)?;

        // Bars carry no series; legend entries ride on empty ones
        let swatch = legend_swatch_px(geometry);
        let half = swatch / 2;
        for entry in &self.legend {
            let color = style.color(entry.color).mix(style.fill_alpha);
            plot.draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                .label(entry.name.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - half), (x + swatch, y + half)], color.filled())
                });
        }

        draw_bar_labels(&mut plot, &self.bars, style, geometry)?;
        draw_callouts(&mut plot, &self.callouts, style, geometry)?;
        draw_legend(&mut plot, style, geometry)
    }
}
