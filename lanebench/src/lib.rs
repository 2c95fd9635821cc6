#![warn(missing_docs)]
//! # LaneBench
//!
//! Randomized microbenchmark harness comparing scalar and SIMD
//! implementations of the same workloads.
//!
//! - **Randomized Scheduling**: every (group, kind) is replicated into a
//!   pending set drained in random order, so drift and thermal effects spread
//!   across all variants
//! - **Warm-up Discard**: each trial repeats its workload; the first
//!   measurement is dropped
//! - **Per-Bucket Statistics**: mean, population standard deviation, min,
//!   max and median per (kind, group)
//! - **Charts and Reports**: grouped bar chart with error bars, JSON, CSV
//!   and terminal output with speedups against a baseline kind
//!
//! ## Custom Workloads
//!
//! ```
//! use lanebench::{FnWorkload, Registry, Runner, RunnerConfig, YieldPolicy, build_series};
//!
//! let mut registry = Registry::with_replication(3);
//! for (kind, factor) in [("scalar", 1.0f32), ("scaled", 2.0)] {
//!     registry.register("scale", kind, FnWorkload::new(vec![1.0f32; 256], move |v: &mut Vec<f32>| {
//!         v.iter_mut().for_each(|x| *x *= factor);
//!         Ok(())
//!     }));
//! }
//!
//! let config = RunnerConfig { seed: Some(1), yield_policy: YieldPolicy::None, ..Default::default() };
//! let outcome = Runner::new(registry, config).run()?;
//! let series = build_series(&outcome.statistics);
//! assert_eq!(series.len(), 2);
//! # Ok::<(), lanebench::RunError>(())
//! ```

pub use lanebench_core::{
    Clock, DEFAULT_REPETITIONS, DEFAULT_REPLICATION, FnWorkload, MonotonicClock, NoProgress,
    Phase, ProgressSink, Reading, Registration, Registry, RunError, RunOutcome, RunState, Runner,
    RunnerConfig, Step, SteppingClock, TrialReport, Workload, WorkloadError, WorkloadResult,
    YieldPolicy, progress_percent,
};

pub use lanebench_stats::{
    Aggregated, GroupStatistic, KindStatistics, SampleBuckets, Statistic, compute_statistic,
    finalize,
};

pub use lanebench_report::{
    ChartLayout, ChartRenderer, HtmlChart, OutputFormat, Report, Series, TextChart,
    build_series, publish,
};

pub use lanebench_kernels::{GROUPS, KIND_SCALAR, KIND_SIMD, KernelConfig, register_suite};

pub use lanebench_cli::{Cli, Commands, LaneConfig, run_with_cli};

/// Run the `lanebench` command with the process arguments
pub fn run() -> anyhow::Result<()> {
    lanebench_cli::run()
}
