//! Hit rate per replacement algorithm, as labelled bars on a fixed 0-100 axis.

use super::{
    category_range, draw_bar_labels, draw_bars, draw_mesh, draw_title, Bar, DrawResult, LabelSide,
    MeshSpec,
};
use crate::artifact::{ChartArtifact, Figure};
use crate::error::{ReportError, Result};
use crate::model::{format_percent, AlgorithmDataset};
use crate::style::{ChartStyle, FigureGeometry};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

pub const FILE_STEM: &str = "mem_hit_rate";

const CHART: &str = "hit rate";
const BAR_WIDTH: f64 = 0.8;

/// Valid hit-rate range, also the fixed y axis
pub const RATE_RANGE: (f64, f64) = (0.0, 100.0);

#[derive(Debug, Clone)]
pub struct HitRateInput {
    pub title: String,
    pub y_desc: String,
    /// Algorithm → hit rate in percent
    pub rates: AlgorithmDataset<f64>,
}

/// Resolved hit-rate chart
#[derive(Debug, Clone, PartialEq)]
pub struct HitRateChart {
    pub title: String,
    pub y_desc: String,
    pub categories: Vec<String>,
    pub bars: Vec<Bar>,
}

pub fn build(input: &HitRateInput, style: &ChartStyle) -> Result<ChartArtifact> {
    if input.rates.is_empty() {
        return Err(ReportError::DataShape {
            chart: CHART,
            detail: "no algorithms to compare".to_string(),
        });
    }

    let (min, max) = RATE_RANGE;
    if let Some((name, &value)) = input
        .rates
        .iter()
        .find(|(_, v)| !(min..=max).contains(*v))
    {
        return Err(ReportError::DomainRange {
            metric: CHART,
            algorithm: name.to_string(),
            value,
            min,
            max,
        });
    }

    let bars: Vec<Bar> = input
        .rates
        .iter()
        .enumerate()
        .map(|(i, (name, &rate))| Bar {
            category: name.to_string(),
            center: i as f64,
            width: BAR_WIDTH,
            value: rate,
            label: format_percent(rate),
            side: LabelSide::Above,
            color: i,
        })
        .collect();

    debug!(bars = bars.len(), "hit rate chart resolved");

    let chart = HitRateChart {
        title: input.title.clone(),
        y_desc: input.y_desc.clone(),
        categories: input.rates.names().map(str::to_string).collect(),
        bars,
    };

    Ok(ChartArtifact::new(
        FILE_STEM,
        FigureGeometry::single_panel(),
        style.clone(),
        Figure::HitRate(chart),
    ))
}

impl HitRateChart {
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
            .build_cartesian_2d(
                category_range(self.categories.len()),
                RATE_RANGE.0..RATE_RANGE.1,
            )?;

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
        draw_bar_labels(&mut plot, &self.bars, style, geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(rates: &[(&str, f64)]) -> HitRateInput {
        HitRateInput {
            title: "Hit rate".to_string(),
            y_desc: "Hits (%)".to_string(),
            rates: AlgorithmDataset::from_pairs(rates.iter().copied()).unwrap(),
        }
    }

    #[test]
    fn test_labels_one_decimal_with_percent() {
        let artifact = build(
            &input(&[("FIFO", 25.0), ("LRU", 58.3), ("WorkingSet", 75.0)]),
            &ChartStyle::hit_rate(),
        )
        .unwrap();
        assert_eq!(artifact.value_labels(), vec!["25.0%", "58.3%", "75.0%"]);
        assert_eq!(artifact.file_name(crate::artifact::OutputFormat::Png), "mem_hit_rate.png");
    }

    #[test]
    fn test_bars_sit_on_category_positions() {
        let artifact = build(&input(&[("FIFO", 25.0), ("LRU", 58.3)]), &ChartStyle::hit_rate()).unwrap();
        let Figure::HitRate(chart) = artifact.figure() else {
            panic!("expected hit rate figure");
        };
        assert_eq!(chart.bars[1].center, 1.0);
        assert_eq!(chart.bars[1].side, LabelSide::Above);
        assert_eq!(chart.categories, vec!["FIFO", "LRU"]);
    }

    #[test]
    fn test_rejects_rate_above_hundred() {
        let err = build(&input(&[("FIFO", 25.0), ("LRU", 150.0)]), &ChartStyle::hit_rate()).unwrap_err();
        match err {
            ReportError::DomainRange { algorithm, value, .. } => {
                assert_eq!(algorithm, "LRU");
                assert_eq!(value, 150.0);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        assert!(build(&input(&[("FIFO", -0.1)]), &ChartStyle::hit_rate()).is_err());
        assert!(build(&input(&[("FIFO", f64::NAN)]), &ChartStyle::hit_rate()).is_err());
    }

    #[test]
    fn test_accepts_bounds() {
        assert!(build(&input(&[("A", 0.0), ("B", 100.0)]), &ChartStyle::hit_rate()).is_ok());
    }

    #[test]
    fn test_rejects_empty_dataset() {
        let err = build(&input(&[]), &ChartStyle::hit_rate()).unwrap_err();
        assert!(matches!(err, ReportError::DataShape { .. }));
    }

    #[test]
    fn test_svg_shows_labels_and_names() {
        let artifact = build(
            &input(&[("FIFO", 25.0), ("LRU", 58.3), ("WorkingSet", 75.0)]),
            &ChartStyle::hit_rate(),
        )
        .unwrap();
        let svg = artifact.render_svg().unwrap();
        for text in ["25.0%", "58.3%", "75.0%", "FIFO", "WorkingSet", "Hit rate"] {
            assert!(svg.contains(text), "missing {text}");
        }
    }

    proptest! {
        /// Property: every bar label is its rate with one decimal and a trailing %
        #[test]
        fn prop_label_matches_rate(rates in prop::collection::vec(0.0f64..=100.0, 1..8)) {
            let names: Vec<String> = (0..rates.len()).map(|i| format!("alg{i}")).collect();
            let pairs: Vec<(&str, f64)> = names.iter().map(String::as_str).zip(rates.iter().copied()).collect();
            let artifact = build(&input(&pairs), &ChartStyle::hit_rate()).unwrap();
            let labels = artifact.value_labels();
            prop_assert_eq!(labels.len(), rates.len());
            for (label, rate) in labels.iter().zip(&rates) {
                prop_assert_eq!(label.to_string(), format!("{:.1}%", rate));
                prop_assert!(label.ends_with('%'));
            }
        }
    }
}
