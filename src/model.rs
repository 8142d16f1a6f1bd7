//! Metric data model consumed by the chart builders.
//!
//! All values are immutable once constructed; constructors validate the
//! invariants so builders only need to check cross-value relations.

use crate::error::{ReportError, Result};
use std::collections::HashSet;

/// A named sequence of samples over an ordered category axis
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    name: String,
    labels: Vec<String>,
    samples: Vec<f64>,
}

impl MetricSeries {
    /// Create a series; labels must be unique and samples finite
    pub fn new(name: impl Into<String>, labels: Vec<String>, samples: Vec<f64>) -> Result<Self> {
        let name = name.into();

        if labels.len() != samples.len() {
            return Err(ReportError::InvalidData {
                subject: name,
                detail: format!(
                    "{} labels but {} samples",
                    labels.len(),
                    samples.len()
                ),
            });
        }

        if let Some(pos) = samples.iter().position(|v| !v.is_finite()) {
            return Err(ReportError::InvalidData {
                subject: name,
                detail: format!("sample for '{}' is not a finite number", labels[pos]),
            });
        }

        if let Some(dup) = first_duplicate(labels.iter().map(String::as_str)) {
            return Err(ReportError::InvalidData {
                subject: name,
                detail: format!("duplicate category '{}'", dup),
            });
        }

        Ok(Self { name, labels, samples })
    }

    /// Create a series from `(label, sample)` pairs
    pub fn from_pairs<L, V, I>(name: impl Into<String>, pairs: I) -> Result<Self>
    where
        L: Into<String>,
        V: Into<f64>,
        I: IntoIterator<Item = (L, V)>,
    {
        let (labels, samples) = pairs
            .into_iter()
            .map(|(l, v)| (l.into(), v.into()))
            .unzip();
        Self::new(name, labels, samples)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Position of a category on the axis
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Sample recorded for a category
    pub fn value_at(&self, label: &str) -> Option<f64> {
        self.position_of(label).map(|i| self.samples[i])
    }

    /// Iterate `(label, sample)` pairs in axis order
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.samples.iter().copied())
    }
}

fn first_duplicate<'a, I: IntoIterator<Item = &'a str>>(keys: I) -> Option<String> {
    let mut seen = HashSet::new();
    keys.into_iter().find(|k| !seen.insert(*k)).map(str::to_string)
}

/// Reject two series whose category axes differ in length or content
pub fn ensure_same_axis(chart: &'static str, a: &MetricSeries, b: &MetricSeries) -> Result<()> {
    if a.labels.len() != b.labels.len() {
        return Err(ReportError::DataShape {
            chart,
            detail: format!(
                "'{}' has {} categories, '{}' has {}",
                a.name,
                a.labels.len(),
                b.name,
                b.labels.len()
            ),
        });
    }

    if let Some((la, lb)) = a.labels.iter().zip(&b.labels).find(|(la, lb)| la != lb) {
        return Err(ReportError::DataShape {
            chart,
            detail: format!(
                "category '{}' of '{}' does not match '{}' of '{}'",
                la, a.name, lb, b.name
            ),
        });
    }

    Ok(())
}

/// Algorithm name → value, in insertion order, keys unique
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmDataset<T> {
    entries: Vec<(String, T)>,
}

impl<T> AlgorithmDataset<T> {
    pub fn new(entries: Vec<(String, T)>) -> Result<Self> {
        if let Some(dup) = first_duplicate(entries.iter().map(|(k, _)| k.as_str())) {
            return Err(ReportError::InvalidData {
                subject: "algorithm dataset".to_string(),
                detail: format!("duplicate algorithm '{}'", dup),
            });
        }
        Ok(Self { entries })
    }

    pub fn from_pairs<K, I>(pairs: I) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, T)>,
    {
        Self::new(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn get(&self, algorithm: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(k, _)| k == algorithm)
            .map(|(_, v)| v)
    }

    /// First entry, the baseline by convention
    pub fn first(&self) -> Option<(&str, &T)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A value computed from a dataset relative to a baseline entry
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetric {
    pub algorithm: String,
    pub value: f64,
}

/// Percentage improvement of every algorithm over `baseline`:
/// `(baseline - value) / baseline * 100`, positive when lower than baseline.
pub fn relative_improvement(
    dataset: &AlgorithmDataset<u64>,
    baseline: &str,
) -> Result<Vec<DerivedMetric>> {
    let base = match dataset.get(baseline) {
        Some(&b) => b,
        None => {
            return Err(ReportError::UndefinedDerivedMetric {
                metric: "relative improvement",
                baseline: baseline.to_string(),
                reason: "is not in the dataset".to_string(),
            })
        }
    };

    if base == 0 {
        return Err(ReportError::UndefinedDerivedMetric {
            metric: "relative improvement",
            baseline: baseline.to_string(),
            reason: "is zero".to_string(),
        });
    }

    let base = base as f64;
    Ok(dataset
        .iter()
        .map(|(name, &value)| DerivedMetric {
            algorithm: name.to_string(),
            value: (base - value as f64) / base * 100.0,
        })
        .collect())
}

/// Where an annotation is anchored vertically
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnotationAnchor {
    /// A specific data value at the category
    Value(f64),
    /// The top of the tallest bar drawn at the category
    Tallest,
}

/// Fixed text callout tied to one category of a chart.
///
/// Callouts are editorial input, never derived from the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub category: String,
    pub anchor: AnnotationAnchor,
    pub text: String,
    /// Text displacement from the anchor, in (category, value) units
    pub offset: (f64, f64),
}

impl Annotation {
    /// Callout pointing at a specific data point
    pub fn at_point(category: impl Into<String>, value: f64, text: impl Into<String>, offset: (f64, f64)) -> Self {
        Self {
            category: category.into(),
            anchor: AnnotationAnchor::Value(value),
            text: text.into(),
            offset,
        }
    }

    /// Callout placed `lift` units above the tallest bar of a category
    pub fn above_tallest(category: impl Into<String>, text: impl Into<String>, lift: f64) -> Self {
        Self {
            category: category.into(),
            anchor: AnnotationAnchor::Tallest,
            text: text.into(),
            offset: (0.0, lift),
        }
    }
}

/// `25.0%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `+62.8%`, `-12.0%`
pub fn format_signed_percent(value: f64) -> String {
    format!("{:+.1}%", value)
}

/// `9.4`
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}
