//! End-to-end report runs against scratch directories

use simreport::charts::{disk, hit_rate, scheduler};
use simreport::{datasets, ChartStyle, OutputFormat, ReportError, ReportGenerator};

#[test]
fn test_report_run_writes_every_chart() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::new(dir.path(), OutputFormat::Svg);

    let mut console = Vec::new();
    let written = generator.run(&mut console).unwrap();
    let console = String::from_utf8(console).unwrap();

    assert_eq!(written.len(), 4);
    let hit_rate_svg = std::fs::read_to_string(dir.path().join("mem_hit_rate.svg")).unwrap();
    for label in ["25.0%", "58.3%", "75.0%"] {
        assert!(hit_rate_svg.contains(label), "missing {label}");
    }

    let disk_svg = std::fs::read_to_string(dir.path().join("disk_comparativa.svg")).unwrap();
    for label in ["+0.0%", "+62.8%", "+53.0%", "Eficiencia Relativa"] {
        assert!(disk_svg.contains(label), "missing {label}");
    }

    let progress: Vec<&str> = console.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(progress.len(), 4);
    assert!(progress[2].starts_with("[3/4]"));

    let listed: Vec<&str> = console
        .lines()
        .skip_while(|l| *l != "Files created:")
        .skip(1)
        .collect();
    assert_eq!(
        listed,
        vec![
            "  - mem_fallos_vs_marcos.svg",
            "  - mem_hit_rate.svg",
            "  - disk_comparativa.svg",
            "  - scheduler_comparativa.svg"
        ]
    );
}

#[test]
fn test_png_run_writes_png_files() {
    let dir = tempfile::tempdir().unwrap();
    let written = ReportGenerator::new(dir.path(), OutputFormat::Png)
        .run(&mut std::io::sink())
        .unwrap();

    for path in &written {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG", "{} is not a PNG", path.display());
    }
}

#[test]
fn test_scenario_hit_rates() {
    let artifact = hit_rate::build(&datasets::hit_rates().unwrap(), &ChartStyle::hit_rate()).unwrap();
    assert_eq!(artifact.value_labels(), vec!["25.0%", "58.3%", "75.0%"]);
}

#[test]
fn test_scenario_disk_improvements() {
    let artifact =
        disk::build(&datasets::disk_movement().unwrap(), &ChartStyle::disk_movement()).unwrap();
    assert_eq!(&artifact.value_labels()[3..], ["+0.0%", "+62.8%", "+53.0%"]);
}

#[test]
fn test_scenario_scheduler_groups() {
    let artifact =
        scheduler::build(&datasets::scheduler_metrics().unwrap(), &ChartStyle::scheduler()).unwrap();
    assert_eq!(
        artifact.value_labels(),
        vec!["9.4", "7.6", "15.8", "14.0", "2.5", "4.8"]
    );
    assert_eq!(artifact.callout_texts().len(), 3);
}

#[test]
fn test_hit_rate_over_hundred_is_domain_error() {
    let mut input = datasets::hit_rates().unwrap();
    input.rates = simreport::AlgorithmDataset::from_pairs([("FIFO", 150.0)]).unwrap();
    let err = hit_rate::build(&input, &ChartStyle::hit_rate()).unwrap_err();
    assert!(matches!(err, ReportError::DomainRange { .. }));
}
