//! Report Data Structures

use crate::series::{Series, build_series};
use chrono::{DateTime, Utc};
use lanebench_stats::{Aggregated, Statistic};
use serde::{Deserialize, Serialize};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// Run configuration
    pub config: ReportConfig,
    /// One row per (kind, group)
    pub results: Vec<StatisticRow>,
    /// Chart series, one per kind
    pub series: Vec<Series>,
    /// Speedups per group
    pub comparisons: Vec<GroupComparison>,
    /// Run totals
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report schema version
    pub schema_version: u32,
    /// lanebench version
    pub version: String,
    /// Report generation time
    pub timestamp: DateTime<Utc>,
    /// Git commit of the working tree
    pub git_commit: Option<String>,
    /// Git branch of the working tree
    pub git_branch: Option<String>,
    /// Host description
    pub system: SystemInfo,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// CPU model
    pub cpu: String,
    /// Available cores
    pub cpu_cores: u32,
    /// Total memory in GB
    pub memory_gb: f64,
}

/// Run configuration captured in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Trials per registration
    pub replication: usize,
    /// Repetitions per trial, including the warm-up
    pub repetitions: usize,
    /// Scheduling seed, if fixed
    pub seed: Option<u64>,
    /// Kind speedups are relative to
    pub baseline_kind: String,
}

/// One (kind, group) statistic, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticRow {
    /// Kind label
    pub kind: String,
    /// Group label
    pub group: String,
    /// Bucket statistic
    #[serde(flatten)]
    pub statistic: Statistic,
}

/// Speedups of every kind within one group, relative to the baseline kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupComparison {
    /// Group label
    pub group: String,
    /// Baseline kind
    pub baseline: String,
    /// One entry per kind present in the group
    pub entries: Vec<SpeedupEntry>,
}

/// Single entry in a speedup table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedupEntry {
    /// Kind label
    pub kind: String,
    /// Mean elapsed milliseconds
    pub mean_ms: f64,
    /// baseline mean / this mean (>1.0 = faster than baseline)
    pub speedup: f64,
    /// Whether this entry is the baseline kind
    pub is_baseline: bool,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Executed trials
    pub trials: usize,
    /// Recorded samples
    pub samples: usize,
    /// Non-empty (kind, group) buckets
    pub buckets: usize,
    /// Wall-clock duration of the run
    pub duration_ms: f64,
    /// Cycle counter ticks per nanosecond (0 when unavailable)
    pub cycles_per_ns: f64,
}

/// Build a report from finalized statistics
pub fn build_report(
    meta: ReportMeta,
    config: ReportConfig,
    statistics: &Aggregated,
    summary: ReportSummary,
) -> Report {
    let results = statistics
        .iter()
        .map(|(kind, group, statistic)| StatisticRow {
            kind: kind.to_string(),
            group: group.to_string(),
            statistic: *statistic,
        })
        .collect();

    let comparisons = compare_to_baseline(statistics, &config.baseline_kind);

    Report {
        meta,
        config,
        results,
        series: build_series(statistics),
        comparisons,
        summary: ReportSummary {
            buckets: statistics.len(),
            ..summary
        },
    }
}

/// Per-group speedups against `baseline_kind`.
///
/// Groups without a baseline statistic are skipped. Group order follows the
/// baseline kind's first-recorded order.
pub fn compare_to_baseline(statistics: &Aggregated, baseline_kind: &str) -> Vec<GroupComparison> {
    let Some(baseline) = statistics.kinds().iter().find(|k| k.kind == baseline_kind) else {
        return Vec::new();
    };

    baseline
        .groups
        .iter()
        .map(|base| {
            let entries = statistics
                .kinds()
                .iter()
                .filter_map(|k| {
                    let stat = statistics.get(&k.kind, &base.group)?;
                    let speedup = if stat.mean > 0.0 {
                        base.statistic.mean / stat.mean
                    } else {
                        0.0
                    };
                    Some(SpeedupEntry {
                        kind: k.kind.clone(),
                        mean_ms: stat.mean,
                        speedup,
                        is_baseline: k.kind == baseline_kind,
                    })
                })
                .collect();

            GroupComparison {
                group: base.group.clone(),
                baseline: baseline_kind.to_string(),
                entries,
            }
        })
        .collect()
}
