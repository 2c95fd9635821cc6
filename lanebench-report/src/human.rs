//! Human-Readable Output
//!
//! Terminal text: per-group statistics, speedup tables against the baseline
//! kind, a text bar chart of the series and a run summary.

use crate::report::{Report, StatisticRow};
use crate::series::{ChartLayout, ChartRenderer, Series};

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: usize = 40;

/// Renders series as horizontal text bars, one block per group
#[derive(Debug, Clone, Default)]
pub struct TextChart;

impl ChartRenderer for TextChart {
    fn render(&mut self, series: &[Series], layout: &ChartLayout) -> String {
        let mut output = format!("{} [{}]\n", layout.title, layout.y_title);

        let peak = series
            .iter()
            .flat_map(|s| s.y.iter().copied())
            .fold(0.0f64, f64::max);
        let name_width = series.iter().map(|s| s.name.len()).max().unwrap_or(0);

        for group in group_order(series) {
            output.push_str(&format!("  {}\n", group));
            for s in series {
                let Some((_, mean, std_dev)) = s.points().find(|(x, _, _)| *x == group) else {
                    continue;
                };
                let filled = if peak > 0.0 {
                    ((mean / peak) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                output.push_str(&format!(
                    "    {:<width$} |{:<bar$}| {:.3} ± {:.3}\n",
                    s.name,
                    "#".repeat(filled.min(BAR_WIDTH)),
                    mean,
                    std_dev,
                    width = name_width,
                    bar = BAR_WIDTH
                ));
            }
        }

        output
    }
}

/// Groups in first-seen order across all series
fn group_order(series: &[Series]) -> Vec<&str> {
    let mut groups: Vec<&str> = Vec::new();
    for x in series.iter().flat_map(|s| s.x.iter()) {
        if !groups.contains(&x.as_str()) {
            groups.push(x);
        }
    }
    groups
}

/// Format a report for terminal display
pub fn format_human_output(report: &Report, layout: &ChartLayout) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("LaneBench Results\n");
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push_str("\n\n");

    let mut groups: Vec<(&str, Vec<&StatisticRow>)> = Vec::new();
    for row in &report.results {
        match groups.iter_mut().find(|(g, _)| *g == row.group) {
            Some((_, rows)) => rows.push(row),
            None => groups.push((row.group.as_str(), vec![row])),
        }
    }

    for (group, rows) in groups {
        output.push_str(&format!("Group: {}\n", group));
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');

        for row in rows {
            let s = &row.statistic;
            output.push_str(&format!("  {}\n", row.kind));
            output.push_str(&format!(
                "      mean: {:.4} ms  median: {:.4} ms  stddev: {:.4} ms\n",
                s.mean, s.median, s.std_dev
            ));
            output.push_str(&format!(
                "      min: {:.4} ms  max: {:.4} ms  samples: {}\n",
                s.min, s.max, s.sample_count
            ));
        }
        output.push('\n');
    }

    for cmp in &report.comparisons {
        output.push_str(&format!("\nSpeedup vs {}: {}\n", cmp.baseline, cmp.group));
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');

        let width = cmp
            .entries
            .iter()
            .map(|e| e.kind.len())
            .max()
            .unwrap_or(8)
            .max(4);
        output.push_str(&format!(
            "  {:<width$}  {:>12}  {:>10}\n",
            "Kind",
            "mean (ms)",
            "Speedup",
            width = width
        ));

        let mut sorted: Vec<_> = cmp.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.speedup
                .partial_cmp(&a.speedup)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for entry in sorted {
            let marker = if entry.is_baseline { " (baseline)" } else { "" };
            output.push_str(&format!(
                "  {:<width$}  {:>12.4}  {:>9.2}x{}\n",
                entry.kind,
                entry.mean_ms,
                entry.speedup,
                marker,
                width = width
            ));
        }
    }

    if !report.series.is_empty() {
        output.push('\n');
        output.push_str(&TextChart.render(&report.series, layout));
    }

    let summary = &report.summary;
    output.push('\n');
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Summary: {} trials, {} samples, {} buckets in {:.0} ms\n",
        summary.trials, summary.samples, summary.buckets, summary.duration_ms
    ));
    if summary.cycles_per_ns > 0.0 {
        output.push_str(&format!("Cycle counter: {:.2} GHz\n", summary.cycles_per_ns));
    }

    output
}
