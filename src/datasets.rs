//! Measured results from the kernel simulation runs, as report inputs.
//!
//! Chart texts are kept in the report's language (Spanish).

use crate::charts::disk::DiskMovementInput;
use crate::charts::faults::FaultCurveInput;
use crate::charts::hit_rate::HitRateInput;
use crate::charts::scheduler::{SchedulerInput, DEFAULT_BAR_WIDTH};
use crate::error::Result;
use crate::model::{AlgorithmDataset, Annotation, MetricSeries};

/// Reference string replayed for every frame count
pub const REFERENCE_STRING: &str = "1,2,3,4,1,2,5,1,2,3,4,5";

/// Cylinder request queue served by the disk schedulers
pub const DISK_QUEUE: &str = "98,183,37,122,14,124,65,67";
pub const DISK_START: u32 = 50;

const FRAMES: [u32; 7] = [2, 3, 4, 5, 6, 7, 8];

fn frame_series(name: &str, faults: [u32; 7]) -> Result<MetricSeries> {
    MetricSeries::from_pairs(
        name,
        FRAMES.iter().map(|f| f.to_string()).zip(faults),
    )
}

/// FIFO against LRU over 2..=8 frames; FIFO shows Belady's anomaly at 4
pub fn page_faults() -> Result<FaultCurveInput> {
    Ok(FaultCurveInput {
        title: format!(
            "Comparativa: Fallos de Página vs. Número de Marcos\n(Secuencia: {})",
            REFERENCE_STRING
        ),
        x_desc: "Número de Marcos de Memoria".to_string(),
        y_desc: "Fallos de Página".to_string(),
        series: vec![
            frame_series("FIFO", [10, 9, 10, 5, 5, 4, 4])?,
            frame_series("LRU", [10, 9, 8, 6, 5, 4, 4])?,
        ],
        annotation: Annotation::at_point(
            "4",
            10.0,
            "Anomalía de Belady\n(3→4 marcos: +1 fallo)",
            (1.0, 0.5),
        ),
    })
}

pub fn hit_rates() -> Result<HitRateInput> {
    Ok(HitRateInput {
        title: "Comparativa de Tasa de Aciertos por Algoritmo\n(Secuencia con Localidad Temporal)"
            .to_string(),
        y_desc: "Tasa de Aciertos (%)".to_string(),
        rates: AlgorithmDataset::from_pairs([
            ("FIFO", 25.0),
            ("LRU", 58.3),
            ("Working Set (avanzado)", 75.0),
        ])?,
    })
}

/// Total head movement; FCFS is the baseline
pub fn disk_movement() -> Result<DiskMovementInput> {
    Ok(DiskMovementInput {
        title: format!(
            "Comparativa de Algoritmos de Planificación de Disco\n(Secuencia: {} desde pos. {})",
            DISK_QUEUE, DISK_START
        ),
        movement_title: "Movimiento Total del Cabezal".to_string(),
        movement_desc: "Movimiento Total (cilindros)".to_string(),
        improvement_title: "Eficiencia Relativa".to_string(),
        improvement_desc: "Mejora vs FCFS (%)".to_string(),
        unit: "cilindros".to_string(),
        movements: AlgorithmDataset::from_pairs([("FCFS", 643), ("SSTF", 239), ("SCAN", 302)])?,
    })
}

/// CPU-bound scenario with five processes
pub fn scheduler_metrics() -> Result<SchedulerInput> {
    let metrics = ["Tiempo de Espera", "Tiempo de Retorno", "Tiempo de Respuesta"];
    let series = |name: &str, values: [f64; 3]| MetricSeries::from_pairs(name, metrics.into_iter().zip(values));

    Ok(SchedulerInput {
        title: "Comparativa de Métricas de Scheduling\n(Escenario CPU-bound: 5 procesos)".to_string(),
        y_desc: "Unidades de Tiempo".to_string(),
        series: vec![
            series("Round Robin (Q=3)", [9.4, 15.8, 2.5])?,
            series("SJF", [7.6, 14.0, 4.8])?,
        ],
        callouts: vec![
            Annotation::above_tallest(metrics[0], "✓ SJF mejor", 1.0),
            Annotation::above_tallest(metrics[1], "✓ SJF mejor", 1.0),
            Annotation::above_tallest(metrics[2], "✓ RR mejor", 1.0),
        ],
        bar_width: DEFAULT_BAR_WIDTH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{disk, faults, hit_rate, scheduler};
    use crate::style::ChartStyle;

    #[test]
    fn test_fifo_shows_belady_anomaly() {
        let input = page_faults().unwrap();
        let fifo = &input.series[0];
        assert_eq!(fifo.value_at("3"), Some(9.0));
        assert_eq!(fifo.value_at("4"), Some(10.0));
        assert!(input.title.contains(REFERENCE_STRING));
    }

    #[test]
    fn test_every_dataset_builds() {
        assert!(faults::build(&page_faults().unwrap(), &ChartStyle::fault_curve()).is_ok());
        assert!(hit_rate::build(&hit_rates().unwrap(), &ChartStyle::hit_rate()).is_ok());
        assert!(disk::build(&disk_movement().unwrap(), &ChartStyle::disk_movement()).is_ok());
        assert!(scheduler::build(&scheduler_metrics().unwrap(), &ChartStyle::scheduler()).is_ok());
    }

    #[test]
    fn test_report_labels() {
        let hits = hit_rate::build(&hit_rates().unwrap(), &ChartStyle::hit_rate()).unwrap();
        assert_eq!(hits.value_labels(), vec!["25.0%", "58.3%", "75.0%"]);

        let movement = disk::build(&disk_movement().unwrap(), &ChartStyle::disk_movement()).unwrap();
        assert_eq!(
            movement.value_labels(),
            vec![
                "643\ncilindros",
                "239\ncilindros",
                "302\ncilindros",
                "+0.0%",
                "+62.8%",
                "+53.0%"
            ]
        );

        let sched = scheduler::build(&scheduler_metrics().unwrap(), &ChartStyle::scheduler()).unwrap();
        assert_eq!(sched.value_labels().len(), 6);
        assert_eq!(
            sched.callout_texts(),
            vec!["✓ SJF mejor", "✓ SJF mejor", "✓ RR mejor"]
        );
    }
}
