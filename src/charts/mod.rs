//! Chart builders, one module per report figure, plus the drawing
//! helpers they share.

pub mod disk;
pub mod faults;
pub mod hit_rate;
pub mod scheduler;

use crate::error::{ReportError, Result};
use crate::model::{Annotation, AnnotationAnchor};
use crate::style::{ChartStyle, FigureGeometry};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

pub(crate) type DrawResult<T, DB> =
    std::result::Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub(crate) type Plot<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Which side of a bar its value label is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Above,
    Below,
}

/// A resolved bar in (category, value) coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub category: String,
    pub center: f64,
    pub width: f64,
    pub value: f64,
    /// Formatted value label; `\n` separates stacked lines
    pub label: String,
    pub side: LabelSide,
    /// Palette index
    pub color: usize,
}

impl Bar {
    fn corners(&self) -> [(f64, f64); 2] {
        let half = self.width / 2.0;
        [(self.center - half, 0.0), (self.center + half, self.value)]
    }
}

/// Horizontal alignment of callout text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutAlign {
    Left,
    Center,
}

/// An annotation resolved to chart coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub text: String,
    /// Text baseline position
    pub at: (f64, f64),
    /// Point the connector is drawn to, if any
    pub target: Option<(f64, f64)>,
    pub align: CalloutAlign,
}

/// Place an annotation on a categorical axis.
///
/// `tallest` yields the highest value drawn at a category position and is
/// only consulted for [`AnnotationAnchor::Tallest`].
pub(crate) fn resolve_callout(
    chart: &'static str,
    annotation: &Annotation,
    categories: &[String],
    tallest: impl Fn(usize) -> f64,
    align: CalloutAlign,
    connector: bool,
) -> Result<Callout> {
    let index = categories
        .iter()
        .position(|c| *c == annotation.category)
        .ok_or_else(|| ReportError::DataShape {
            chart,
            detail: format!(
                "annotation refers to unknown category '{}'",
                annotation.category
            ),
        })?;

    let x = index as f64;
    let y = match annotation.anchor {
        AnnotationAnchor::Value(v) => v,
        AnnotationAnchor::Tallest => tallest(index),
    };
    let (dx, dy) = annotation.offset;

    Ok(Callout {
        text: annotation.text.clone(),
        at: (x + dx, y + dy),
        target: connector.then_some((x, y)),
        align,
    })
}

/// X range putting category `i` at `i`, half a slot of padding each side
pub(crate) fn category_range(count: usize) -> Range<f64> {
    -0.5..(count as f64 - 0.5)
}

/// Tick label for an x position; empty between categories
pub(crate) fn category_name(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

/// Upper bound leaving room above the largest value for labels
pub(crate) fn headroom(max: f64, factor: f64) -> f64 {
    if max > 0.0 {
        max * factor
    } else {
        1.0
    }
}

/// Draw a figure or panel title, one centered row per line, and return
/// the area below it
pub(crate) fn draw_title<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    size_pt: f64,
    style: &ChartStyle,
    geometry: &FigureGeometry,
) -> DrawResult<DrawingArea<DB, Shift>, DB> {
    let font = style.font(geometry, size_pt, true);
    let mut remaining = area.clone();
    for line in title.lines() {
        remaining = remaining.titled(line, font.clone())?;
    }
    Ok(remaining)
}

/// Axis and grid configuration shared by the categorical charts
pub(crate) struct MeshSpec<'s> {
    pub categories: &'s [String],
    pub x_desc: Option<&'s str>,
    pub y_desc: &'s str,
    pub x_grid: bool,
}

pub(crate) fn draw_mesh<DB: DrawingBackend>(
    plot: &mut Plot<'_, DB>,
    axes: &MeshSpec<'_>,
    style: &ChartStyle,
    geometry: &FigureGeometry,
) -> DrawResult<(), DB> {
    let categories = axes.categories;
    let formatter = |x: &f64| category_name(categories, *x);

    let mut mesh = plot.configure_mesh();
    mesh.x_labels(categories.len())
        .x_label_formatter(&formatter)
        .y_labels(8)
        .y_desc(axes.y_desc)
        .axis_style(BLACK.stroke_width(geometry.px_u32(0.8)))
        .bold_line_style(style.grid_color().stroke_width(geometry.px_u32(0.8)))
        .light_line_style(TRANSPARENT)
        .axis_desc_style(style.font(geometry, style.axis_label_size_pt, false))
        .label_style(style.font(geometry, style.tick_label_size_pt, false));

    if let Some(x_desc) = axes.x_desc {
        mesh.x_desc(x_desc);
    }
    if !axes.x_grid {
        mesh.disable_x_mesh();
    }

    mesh.draw()
}

/// Filled bars with the style's alpha, then their outlines
pub(crate) fn draw_bars<DB: DrawingBackend>(
    plot: &mut Plot<'_, DB>,
    bars: &[Bar],
    style: &ChartStyle,
    geometry: &FigureGeometry,
) -> DrawResult<(), DB> {
    plot.draw_series(bars.iter().map(|bar| {
        Rectangle::new(
            bar.corners(),
            style.color(bar.color).mix(style.fill_alpha).filled(),
        )
    }))?;

    if style.edge_width_pt > 0.0 {
        let edge = style
            .edge_color
            .stroke_width(geometry.px_u32(style.edge_width_pt));
        plot.draw_series(bars.iter().map(|bar| Rectangle::new(bar.corners(), edge)))?;
    }

    Ok(())
}

/// Value labels: centered on the bar, stacked lines growing away from it
pub(crate) fn draw_bar_labels<DB: DrawingBackend>(
    plot: &mut Plot<'_, DB>,
    bars: &[Bar],
    style: &ChartStyle,
    geometry: &FigureGeometry,
) -> DrawResult<(), DB> {
    let font = style.text(geometry, style.value_label_size_pt, true, &BLACK);
    let line_height = geometry.px(style.value_label_size_pt * 1.2).round() as i32;
    let gap = geometry.px(2.0).round() as i32;

    for bar in bars {
        let lines: Vec<&str> = bar.label.lines().collect();
        let count = lines.len() as i32;

        for (i, line) in lines.into_iter().enumerate() {
            let i = i as i32;
            let (dy, v_pos) = match bar.side {
                LabelSide::Above => (-gap - (count - 1 - i) * line_height, VPos::Bottom),
                LabelSide::Below => (gap + i * line_height, VPos::Top),
            };
            let text_style = font.pos(Pos::new(HPos::Center, v_pos));
            plot.draw_series(std::iter::once(
                EmptyElement::at((bar.center, bar.value))
                    + Text::new(line.to_string(), (0, dy), text_style),
            ))?;
        }
    }

    Ok(())
}

/// Callout text, with a connector and target dot when one is set
pub(crate) fn draw_callouts<DB: DrawingBackend>(
    plot: &mut Plot<'_, DB>,
    callouts: &[Callout],
    style: &ChartStyle,
    geometry: &FigureGeometry,
) -> DrawResult<(), DB> {
    let color = style.annotation_color;
    let font = style.text(geometry, style.annotation_size_pt, true, &color);
    let line_height = geometry.px(style.annotation_size_pt * 1.2).round() as i32;

    for callout in callouts {
        if let Some(target) = callout.target {
            plot.draw_series(std::iter::once(PathElement::new(
                vec![callout.at, target],
                color.stroke_width(geometry.px_u32(2.0)),
            )))?;
            plot.draw_series(std::iter::once(Circle::new(
                target,
                geometry.px_u32(3.0),
                color.filled(),
            )))?;
        }

        let h_pos = match callout.align {
            CalloutAlign::Left => HPos::Left,
            CalloutAlign::Center => HPos::Center,
        };
        let text_style = font.pos(Pos::new(h_pos, VPos::Bottom));

        let lines: Vec<&str> = callout.text.lines().collect();
        for (line, dy) in lines.iter().zip(stacked_above(lines.len(), line_height)) {
            plot.draw_series(std::iter::once(
                EmptyElement::at(callout.at)
                    + Text::new(line.to_string(), (0, dy), text_style.clone()),
            ))?;
        }
    }

    Ok(())
}

/// Vertical offsets for `count` bottom-anchored lines stacked upward, so
/// the last line sits on the anchor and the block never crosses below it
pub(crate) fn stacked_above(count: usize, line_height: i32) -> impl Iterator<Item = i32> {
    let count = count as i32;
    (0..count).map(move |i| -(count - 1 - i) * line_height)
}

/// Legend column width; swatches must fit inside it
const LEGEND_AREA_PT: f64 = 20.0;

/// Width of a legend swatch, in backend pixels
pub(crate) fn legend_swatch_px(geometry: &FigureGeometry) -> i32 {
    geometry.px_u32(LEGEND_AREA_PT * 0.7) as i32
}

/// Legend box in the upper right corner
pub(crate) fn draw_legend<'a, DB: DrawingBackend + 'a>(
    plot: &mut Plot<'a, DB>,
    style: &ChartStyle,
    geometry: &FigureGeometry,
) -> DrawResult<(), DB> {
    plot.configure_series_labels()
        .legend_area_size(geometry.px_u32(LEGEND_AREA_PT))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(style.font(geometry, style.tick_label_size_pt, false))
        .position(SeriesLabelPosition::UpperRight)
        .draw()
}
