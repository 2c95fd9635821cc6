#![warn(missing_docs)]
//! LaneBench Core - Trial Runtime
//!
//! This crate provides the execution engine for benchmarks:
//! - `Workload` / `FnWorkload`: prepare → execute (timed) → cleanup
//! - `Registry`: registrations replicated into a pending set of trials
//! - `Runner`: randomized, warm-up discarding, progress-reporting scheduler
//! - High-precision timing (RDTSCP/CNTVCT cycle counters next to `Instant`)
//!
//! ```
//! use lanebench_core::{FnWorkload, Registry, Runner, RunnerConfig, YieldPolicy};
//!
//! let mut registry = Registry::with_replication(2);
//! registry.register("sum", "scalar", FnWorkload::new(vec![1.0f32; 64], |v: &mut Vec<f32>| {
//!     std::hint::black_box(v.iter().sum::<f32>());
//!     Ok(())
//! }));
//!
//! let config = RunnerConfig { yield_policy: YieldPolicy::None, ..Default::default() };
//! let outcome = Runner::new(registry, config).run().unwrap();
//! assert_eq!(outcome.statistics.get("scalar", "sum").unwrap().sample_count, 6);
//! ```

mod error;
mod measure;
mod progress;
mod registry;
mod runner;
mod workload;

pub use error::{Phase, RunError};
pub use measure::{
    CPU_SET_CAPACITY, Clock, HAS_CYCLE_COUNTER, MonotonicClock, Reading, SteppingClock, pin_to_cpu,
};
pub use progress::{NoProgress, ProgressSink, progress_percent};
pub use registry::{DEFAULT_REPLICATION, Registration, Registry};
pub use runner::{
    DEFAULT_REPETITIONS, DEFAULT_YIELD_PAUSE, RunOutcome, RunState, Runner, RunnerConfig, Step,
    TrialReport, YieldPolicy,
};
pub use workload::{FnWorkload, Workload, WorkloadError, WorkloadResult};
