//! Text and CSV reports of averaged results.

use crate::render::{render_csv, render_text, CsvFormat, TextFormat};
use crate::summary::RunSummary;
use std::io;

/// One titled group of labelled series.
struct Section<'a> {
    heading: String,
    series: Vec<(&'static str, &'a [f64])>,
}

fn sections(summary: &RunSummary) -> Vec<Section<'_>> {
    let devices = summary.devices.iter().map(|device| Section {
        heading: format!("Averaged snapshots for device {}", device.name),
        series: vec![
            ("Average reservation time:", device.avg_reserve_time.as_slice()),
            ("Average busy percentage:", device.avg_percent_time.as_slice()),
        ],
    });
    let queues = summary.queues.iter().map(|queue| Section {
        heading: format!("Averaged snapshots for queue {}", queue.name),
        series: vec![
            ("Average queue length:", queue.avg_length.as_slice()),
            ("Average wait time:", queue.avg_wait_time.as_slice()),
            ("Queue length:", queue.length.as_slice()),
        ],
    });
    devices.chain(queues).collect()
}

/// Write every averaged series as aligned text tables.
pub fn write_text_report(
    summary: &RunSummary,
    out: &mut dyn io::Write,
    format: &TextFormat,
) -> io::Result<()> {
    for section in sections(summary) {
        writeln!(out, "{}", section.heading)?;
        for (label, series) in section.series {
            writeln!(out, "{label}")?;
            writeln!(out, "{}", render_text(&summary.table(series), format))?;
        }
    }
    Ok(())
}

/// Write every averaged series as CSV blocks.
pub fn write_csv_report(
    summary: &RunSummary,
    out: &mut dyn io::Write,
    format: &CsvFormat,
) -> io::Result<()> {
    for section in sections(summary) {
        writeln!(out, "{}", section.heading)?;
        for (label, series) in section.series {
            writeln!(out, "{label}")?;
            writeln!(out, "{}", render_csv(&summary.table(series), format))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{DeviceSeries, QueueSeries};

    fn summary() -> RunSummary {
        RunSummary {
            replications: 2,
            monitor_times: vec![100, 200],
            devices: vec![DeviceSeries {
                name: "server".into(),
                avg_reserve_time: vec![1.0, 2.0],
                avg_percent_time: vec![50.0, 75.0],
            }],
            queues: vec![QueueSeries {
                name: "line".into(),
                avg_length: vec![0.5, 0.25],
                avg_wait_time: vec![f64::NAN, 3.0],
                length: vec![1.0, 0.0],
            }],
        }
    }

    #[test]
    fn test_text_report_sections() {
        let mut out = Vec::new();
        write_text_report(&summary(), &mut out, &TextFormat::default()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let device = text.find("Averaged snapshots for device server").unwrap();
        let queue = text.find("Averaged snapshots for queue line").unwrap();
        assert!(device < queue);
        assert!(text.contains("Average busy percentage:"));
        assert!(text.contains("75.000"));
        assert!(text.contains("Queue length:"));
    }

    #[test]
    fn test_csv_report_uses_format() {
        let mut out = Vec::new();
        write_csv_report(&summary(), &mut out, &CsvFormat::default()).unwrap();
        let csv = String::from_utf8(out).unwrap();

        assert!(csv.contains("Average wait time:\n100,00000;200,00000;\n-;3,00000;\n"));
        assert!(csv.contains("Average reservation time:\n100,00000;200,00000;\n1,00000;2,00000;\n"));
    }
}
