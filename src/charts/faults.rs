//! Page-fault count vs. frame count, one line per replacement algorithm.

use super::{
    category_range, draw_callouts, draw_legend, draw_mesh, draw_title, headroom, legend_swatch_px,
    resolve_callout, Callout, CalloutAlign, DrawResult, MeshSpec,
};
use crate::artifact::{ChartArtifact, Figure};
use crate::error::{ReportError, Result};
use crate::model::{ensure_same_axis, Annotation, MetricSeries};
use crate::style::{ChartStyle, FigureGeometry};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

pub const FILE_STEM: &str = "mem_fallos_vs_marcos";

const CHART: &str = "page faults vs frames";

/// Input for the fault-count chart
#[derive(Debug, Clone)]
pub struct FaultCurveInput {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// One series per algorithm, all over the same frame-count axis
    pub series: Vec<MetricSeries>,
    /// The non-monotonic point to call out
    pub annotation: Annotation,
}

/// Point marker shape, assigned per series in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub marker: Marker,
    pub color: usize,
}

/// Resolved fault-count chart
#[derive(Debug, Clone, PartialEq)]
pub struct FaultCurveChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub categories: Vec<String>,
    pub curves: Vec<Curve>,
    pub callout: Callout,
    pub y_max: f64,
}

/// Build the fault-count line chart
pub fn build(input: &FaultCurveInput, style: &ChartStyle) -> Result<ChartArtifact> {
    let first = match input.series.as_slice() {
        [first, rest @ ..] if !rest.is_empty() => first,
        _ => {
            return Err(ReportError::DataShape {
                chart: CHART,
                detail: format!("needs at least two series, got {}", input.series.len()),
            })
        }
    };

    for other in &input.series[1..] {
        ensure_same_axis(CHART, first, other)?;
    }

    let categories = first.labels().to_vec();
    let curves: Vec<Curve> = input
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| Curve {
            name: s.name().to_string(),
            points: s.samples().iter().enumerate().map(|(x, &y)| (x as f64, y)).collect(),
            marker: if i % 2 == 0 { Marker::Circle } else { Marker::Square },
            color: i,
        })
        .collect();

    let tallest = |idx: usize| {
        input
            .series
            .iter()
            .map(|s| s.samples()[idx])
            .fold(f64::MIN, f64::max)
    };
    let callout = resolve_callout(
        CHART,
        &input.annotation,
        &categories,
        tallest,
        CalloutAlign::Left,
        true,
    )?;

    let data_max = input
        .series
        .iter()
        .flat_map(|s| s.samples().iter().copied())
        .fold(0.0_f64, f64::max);
    let y_max = headroom(data_max.max(callout.at.1), 1.15);

    debug!(
        categories = categories.len(),
        curves = curves.len(),
        y_max,
        "fault curve chart resolved"
    );

    let chart = FaultCurveChart {
        title: input.title.clone(),
        x_desc: input.x_desc.clone(),
        y_desc: input.y_desc.clone(),
        categories,
        curves,
        callout,
        y_max,
    };

    Ok(ChartArtifact::new(
        FILE_STEM,
        FigureGeometry::single_panel(),
        style.clone(),
        Figure::FaultCurve(chart),
    ))
}

impl FaultCurveChart {
    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
        geometry: &FigureGeometry,
    ) -> DrawResult<(), DB> {
        let area = draw_title(root, &self.title, style.title_size_pt, style, geometry)?;

        let mut plot = ChartBuilder::on(&area)
            .margin(geometry.px_u32(10.0))
            .x_label_area_size(geometry.px_u32(36.0))
            .y_label_area_size(geometry.px_u32(40.0))
            .build_cartesian_2d(category_range(self.categories.len()), 0.0..self.y_max)?;

        draw_mesh(
            &mut plot,
            &MeshSpec {
                categories: &self.categories,
                x_desc: Some(&self.x_desc),
                y_desc: &self.y_desc,
                x_grid: true,
            },
            style,
            geometry,
        )?;

        let line_width = geometry.px_u32(style.line_width_pt);
        let marker_size = geometry.px_u32(style.marker_size_pt);
        let swatch = legend_swatch_px(geometry);

        for curve in &self.curves {
            let color = style.color(curve.color);

            plot.draw_series(LineSeries::new(
                curve.points.iter().copied(),
                color.stroke_width(line_width),
            ))?
            .label(curve.name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], color.stroke_width(line_width))
            });

            let size = marker_size as i32;
            match curve.marker {
                Marker::Circle => {
                    plot.draw_series(
                        curve
                            .points
                            .iter()
                            .map(|&p| Circle::new(p, marker_size, color.filled())),
                    )?;
                }
                Marker::Square => {
                    plot.draw_series(curve.points.iter().map(|&p| {
                        EmptyElement::at(p)
                            + Rectangle::new([(-size, -size), (size, size)], color.filled())
                    }))?;
                }
            }
        }

        draw_callouts(&mut plot, std::slice::from_ref(&self.callout), style, geometry)?;
        draw_legend(&mut plot, style, geometry)
    }
}
