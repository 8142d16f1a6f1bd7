//! Property-based tests for the chart builders
//!
//! Builders are checked without rendering, so cases stay cheap.

use proptest::prelude::*;
use simreport::charts::{disk, scheduler};
use simreport::model::relative_improvement;
use simreport::{AlgorithmDataset, Annotation, ChartStyle, MetricSeries, ReportError};

const METRICS: [&str; 3] = ["wait", "turnaround", "response"];

fn arb_metric_values() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(0.0f64..50.0)
}

fn scheduler_input(categories: [&str; 3], a: [f64; 3], b: [f64; 3]) -> scheduler::SchedulerInput {
    scheduler::SchedulerInput {
        title: "Scheduling".to_string(),
        y_desc: "Time".to_string(),
        series: vec![
            MetricSeries::from_pairs("RR", METRICS.into_iter().zip(a)).unwrap(),
            MetricSeries::from_pairs("SJF", categories.into_iter().zip(b)).unwrap(),
        ],
        callouts: METRICS
            .iter()
            .map(|m| Annotation::above_tallest(*m, "better", 1.0))
            .collect(),
        bar_width: scheduler::DEFAULT_BAR_WIDTH,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: improvement is (b - m) / b * 100 for every entry
    #[test]
    fn prop_improvement_formula(base in 1u64..10_000, others in prop::collection::vec(0u64..10_000, 1..5)) {
        let mut pairs = vec![("base".to_string(), base)];
        pairs.extend(others.iter().enumerate().map(|(i, &m)| (format!("alg{i}"), m)));
        let dataset = AlgorithmDataset::new(pairs).unwrap();

        let derived = relative_improvement(&dataset, "base").unwrap();
        prop_assert_eq!(derived[0].value, 0.0);
        for (metric, &m) in derived[1..].iter().zip(&others) {
            let expected = (base as f64 - m as f64) / base as f64 * 100.0;
            prop_assert!((metric.value - expected).abs() < 1e-9);
        }
    }

    /// Property: a zero baseline never yields an improvement chart
    #[test]
    fn prop_zero_baseline_rejected(others in prop::collection::vec(0u64..10_000, 1..5)) {
        let mut pairs = vec![("FCFS".to_string(), 0u64)];
        pairs.extend(others.iter().enumerate().map(|(i, &m)| (format!("alg{i}"), m)));
        let input = disk::DiskMovementInput {
            title: "Disk".to_string(),
            movement_title: "Movement".to_string(),
            movement_desc: "Cylinders".to_string(),
            improvement_title: "Improvement".to_string(),
            improvement_desc: "%".to_string(),
            unit: "cyl".to_string(),
            movements: AlgorithmDataset::new(pairs).unwrap(),
        };
        let result = disk::build(&input, &ChartStyle::disk_movement());
        let rejected = matches!(result, Err(ReportError::UndefinedDerivedMetric { .. }));
        prop_assert!(rejected);
    }

    /// Property: matching category lists always build
    #[test]
    fn prop_scheduler_accepts_shared_categories(a in arb_metric_values(), b in arb_metric_values()) {
        let artifact = scheduler::build(&scheduler_input(METRICS, a, b), &ChartStyle::scheduler());
        prop_assert!(artifact.is_ok());
        prop_assert_eq!(artifact.unwrap().value_labels().len(), 6);
    }

    /// Property: any renamed category is a data-shape error
    #[test]
    fn prop_scheduler_rejects_mismatched_categories(
        a in arb_metric_values(),
        b in arb_metric_values(),
        slot in 0usize..3,
    ) {
        let mut categories = METRICS;
        categories[slot] = "latency";
        let result = scheduler::build(&scheduler_input(categories, a, b), &ChartStyle::scheduler());
        let rejected = matches!(result, Err(ReportError::DataShape { .. }));
        prop_assert!(rejected);
    }
}
