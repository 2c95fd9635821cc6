//! Randomized Trial Runner
//!
//! Drives the pending set of a `Registry` to empty:
//!
//! ```text
//! Idle ──step──▶ Running ──(pending empty)──▶ Finalizing ──▶ Done
//!                 │    ▲
//!                 └────┘  pick random trial, report progress,
//!                         run repetitions, yield
//! ```
//!
//! Every step picks one pending trial uniformly among those that remain
//! (swap-remove), so the execution order is a uniform random permutation of
//! the pending multiset. A trial runs `repetitions` times; repetition 0 is a
//! warm-up whose timing is discarded, the rest land in the (kind, group)
//! sample bucket. Any workload failure aborts the run without statistics.

use crate::error::{Phase, RunError};
use crate::measure::{Clock, MonotonicClock, pin_to_cpu};
use crate::progress::{NoProgress, ProgressSink, progress_percent};
use crate::registry::{Registration, Registry};
use lanebench_stats::{Aggregated, SampleBuckets, finalize};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Repetitions per trial: one warm-up plus three measured
pub const DEFAULT_REPETITIONS: usize = 4;

/// Pause between trials for the synchronous driver
pub const DEFAULT_YIELD_PAUSE: Duration = Duration::from_millis(1);

/// How the synchronous driver hands control back between trials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldPolicy {
    /// Loop straight into the next trial
    None,
    /// `std::thread::yield_now()`
    Thread,
    /// Sleep for the given duration
    Sleep(Duration),
}

impl Default for YieldPolicy {
    fn default() -> Self {
        YieldPolicy::Sleep(DEFAULT_YIELD_PAUSE)
    }
}

impl YieldPolicy {
    fn apply(self) {
        match self {
            YieldPolicy::None => {}
            YieldPolicy::Thread => std::thread::yield_now(),
            YieldPolicy::Sleep(pause) => std::thread::sleep(pause),
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repetitions per trial, including the warm-up
    pub repetitions: usize,
    /// Seed for the trial order; entropy when `None`
    pub seed: Option<u64>,
    /// Yield behavior between trials for `Runner::run`
    pub yield_policy: YieldPolicy,
    /// Pin the running thread to this CPU when the run starts
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            seed: None,
            yield_policy: YieldPolicy::default(),
            pin_cpu: None,
        }
    }
}

/// Lifecycle of a runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, nothing executed yet
    Idle,
    /// Consuming the pending set
    Running,
    /// Computing statistics
    Finalizing,
    /// Statistics handed out
    Done,
    /// A workload failed; no statistics will be produced
    Aborted,
}

/// What one executed trial contributed
#[derive(Debug, Clone)]
pub struct TrialReport {
    /// Workload label
    pub group: String,
    /// Implementation variant label
    pub kind: String,
    /// Percentage reported to the progress sink
    pub progress: u8,
    /// Pending trials left after this one
    pub remaining: usize,
    /// Measured elapsed times that were recorded (milliseconds)
    pub recorded_ms: Vec<f64>,
    /// Elapsed time of the discarded warm-up (milliseconds)
    pub warmup_ms: f64,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Per (kind, group) statistics
    pub statistics: Aggregated,
    /// Trials executed
    pub trials: usize,
    /// Samples recorded across all buckets
    pub samples: usize,
    /// Wall time from the first step to finalization
    pub duration: Duration,
    /// Cycle counter ticks per nanosecond over measured executions (0 when unavailable)
    pub cycles_per_ns: f64,
}

/// Outcome of a single `Runner::step`
#[derive(Debug, Clone)]
pub enum Step {
    /// One trial was executed; more steps follow
    Trial(TrialReport),
    /// The pending set was empty and the run finalized
    Finished(RunOutcome),
}

/// Randomized benchmark runner over a `Registry`
pub struct Runner {
    registry: Registry,
    pending: Vec<usize>,
    total: usize,
    buckets: SampleBuckets,
    config: RunnerConfig,
    rng: StdRng,
    clock: Box<dyn Clock + Send>,
    progress: Box<dyn ProgressSink + Send>,
    state: RunState,
    started: Option<Instant>,
    executed: usize,
    measured_nanos: u64,
    measured_cycles: u64,
}

impl Runner {
    /// Create a runner over `registry`, with a monotonic clock and no progress sink
    pub fn new(registry: Registry, config: RunnerConfig) -> Self {
        let pending = registry.pending_set();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        if config.repetitions < 2 {
            warn!(
                repetitions = config.repetitions,
                "fewer than 2 repetitions per trial: every measurement is a warm-up"
            );
        }

        Self {
            total: pending.len(),
            pending,
            registry,
            buckets: SampleBuckets::new(),
            config,
            rng,
            clock: Box::new(MonotonicClock::new()),
            progress: Box::new(NoProgress),
            state: RunState::Idle,
            started: None,
            executed: 0,
            measured_nanos: 0,
            measured_cycles: 0,
        }
    }

    /// Replace the time source
    pub fn with_clock<C>(mut self, clock: C) -> Self
    where
        C: Clock + Send + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Attach a progress sink
    pub fn with_progress<P>(mut self, progress: P) -> Self
    where
        P: ProgressSink + Send + 'static,
    {
        self.progress = Box::new(progress);
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Size of the pending set at the start of the run
    pub fn total(&self) -> usize {
        self.total
    }

    /// Trials still pending
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Pending trials of one (group, kind) registration
    pub fn pending_for(&self, group: &str, kind: &str) -> usize {
        self.pending
            .iter()
            .filter(|&&index| {
                let registration = &self.registry.registrations()[index];
                registration.group() == group && registration.kind() == kind
            })
            .count()
    }

    /// Advance the run by one scheduling step
    pub fn step(&mut self) -> Result<Step, RunError> {
        match self.state {
            RunState::Idle => self.start(),
            RunState::Running => {}
            state => return Err(RunError::InvalidState(state)),
        }

        if self.pending.is_empty() {
            return Ok(Step::Finished(self.finish()));
        }

        let slot = self.rng.gen_range(0..self.pending.len());
        let index = self.pending.swap_remove(slot);
        let remaining = self.pending.len();
        let percent = progress_percent(remaining, self.total);
        self.progress.report(percent);

        match self.run_trial(index) {
            Ok((warmup_ms, recorded_ms)) => {
                let registration = &self.registry.registrations()[index];
                debug!(
                    group = registration.group(),
                    kind = registration.kind(),
                    remaining,
                    warmup_ms,
                    "trial complete"
                );
                self.executed += 1;
                Ok(Step::Trial(TrialReport {
                    group: registration.group().to_string(),
                    kind: registration.kind().to_string(),
                    progress: percent,
                    remaining,
                    recorded_ms,
                    warmup_ms,
                }))
            }
            Err(err) => {
                self.state = RunState::Aborted;
                self.progress.abandon();
                Err(err)
            }
        }
    }

    /// Run to completion, yielding per `RunnerConfig::yield_policy` between trials
    pub fn run(&mut self) -> Result<RunOutcome, RunError> {
        loop {
            match self.step()? {
                Step::Trial(_) => self.config.yield_policy.apply(),
                Step::Finished(outcome) => return Ok(outcome),
            }
        }
    }

    /// Run to completion on a tokio runtime, yielding to the scheduler between trials
    pub async fn run_async(&mut self) -> Result<RunOutcome, RunError> {
        loop {
            match self.step()? {
                Step::Trial(_) => tokio::task::yield_now().await,
                Step::Finished(outcome) => return Ok(outcome),
            }
        }
    }

    fn start(&mut self) {
        if let Some(cpu) = self.config.pin_cpu {
            if let Err(e) = pin_to_cpu(cpu) {
                warn!(cpu, error = %e, "failed to pin runner thread");
            }
        }
        info!(
            trials = self.total,
            registrations = self.registry.len(),
            repetitions = self.config.repetitions,
            "starting run"
        );
        self.started = Some(Instant::now());
        self.state = RunState::Running;
    }

    /// Execute all repetitions of one trial, recording everything after the warm-up
    fn run_trial(&mut self, index: usize) -> Result<(f64, Vec<f64>), RunError> {
        let repetitions = self.config.repetitions;
        let clock = self.clock.as_ref();
        let registration = self.registry.get_mut(index);

        let timings = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            measure_repetitions(registration, clock, repetitions)
        }))
        .map_err(|panic| {
            let message = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            let registration = &self.registry.registrations()[index];
            RunError::Panicked {
                group: registration.group().to_string(),
                kind: registration.kind().to_string(),
                message,
            }
        })??;

        let registration = &self.registry.registrations()[index];
        let mut warmup_ms = 0.0;
        let mut recorded_ms = Vec::with_capacity(repetitions.saturating_sub(1));
        for (repetition, (nanos, cycles)) in timings.into_iter().enumerate() {
            let elapsed_ms = nanos as f64 / 1_000_000.0;
            if repetition == 0 {
                warmup_ms = elapsed_ms;
                continue;
            }
            self.buckets
                .record(registration.kind(), registration.group(), elapsed_ms);
            self.measured_nanos += nanos;
            self.measured_cycles += cycles;
            recorded_ms.push(elapsed_ms);
        }

        Ok((warmup_ms, recorded_ms))
    }

    fn finish(&mut self) -> RunOutcome {
        self.state = RunState::Finalizing;

        let buckets = std::mem::take(&mut self.buckets);
        let statistics = finalize(&buckets);
        let duration = self.started.map(|s| s.elapsed()).unwrap_or_default();
        let cycles_per_ns = if self.measured_nanos > 0 {
            self.measured_cycles as f64 / self.measured_nanos as f64
        } else {
            0.0
        };

        info!(
            trials = self.executed,
            buckets = statistics.len(),
            elapsed_ms = duration.as_secs_f64() * 1000.0,
            "run finalized"
        );

        self.progress.finish();
        self.state = RunState::Done;

        RunOutcome {
            statistics,
            trials: self.executed,
            samples: buckets.total_samples(),
            duration,
            cycles_per_ns,
        }
    }
}

/// prepare → start → execute → end → cleanup, `repetitions` times.
/// Returns (nanos, cycles) per repetition.
fn measure_repetitions(
    registration: &mut Registration,
    clock: &dyn Clock,
    repetitions: usize,
) -> Result<Vec<(u64, u64)>, RunError> {
    let mut timings = Vec::with_capacity(repetitions);

    for repetition in 0..repetitions {
        let fail = |phase, source, registration: &Registration| RunError::Callable {
            phase,
            group: registration.group().to_string(),
            kind: registration.kind().to_string(),
            repetition,
            source,
        };

        let workload = registration.workload_mut();
        if let Err(e) = workload.prepare() {
            return Err(fail(Phase::Prepare, e, registration));
        }

        let start = clock.now();
        let executed = workload.execute();
        let end = clock.now();
        if let Err(e) = executed {
            return Err(fail(Phase::Execute, e, registration));
        }

        let workload = registration.workload_mut();
        if let Err(e) = workload.cleanup() {
            return Err(fail(Phase::Cleanup, e, registration));
        }

        timings.push(end.since(start));
    }

    Ok(timings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{Reading, SteppingClock};
    use crate::workload::FnWorkload;
    use std::sync::{Arc, Mutex};

    fn config(seed: u64) -> RunnerConfig {
        RunnerConfig {
            seed: Some(seed),
            yield_policy: YieldPolicy::None,
            ..Default::default()
        }
    }

    fn counting(counter: Arc<Mutex<usize>>) -> FnWorkload<Arc<Mutex<usize>>> {
        FnWorkload::new(counter, |c| {
            *c.lock().unwrap() += 1;
            Ok(())
        })
    }

    /// Clock whose elapsed time per measured execution comes from a script
    struct ScriptedClock {
        script: Vec<u64>,
        calls: std::cell::Cell<usize>,
        now: std::cell::Cell<u64>,
    }

    impl ScriptedClock {
        fn new(script: Vec<u64>) -> Self {
            Self {
                script,
                calls: std::cell::Cell::new(0),
                now: std::cell::Cell::new(0),
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> Reading {
            let call = self.calls.get();
            self.calls.set(call + 1);
            // Odd calls are end stamps: advance by the scripted execution time
            if call % 2 == 1 {
                let step = self.script[(call / 2) % self.script.len()];
                self.now.set(self.now.get() + step);
            }
            Reading {
                nanos: self.now.get(),
                cycles: 0,
            }
        }
    }

    #[test]
    fn test_full_run_consumes_pending_set() {
        let counter = Arc::new(Mutex::new(0));
        let mut registry = Registry::new();
        registry
            .register("sum", "scalar", counting(counter.clone()))
            .register("sum", "simd", counting(counter.clone()));

        let mut runner = Runner::new(registry, config(7));
        assert_eq!(runner.total(), 40);
        assert_eq!(runner.pending_for("sum", "scalar"), 20);
        assert_eq!(runner.pending_for("sum", "simd"), 20);

        let outcome = runner.run().unwrap();

        assert_eq!(runner.pending(), 0);
        assert_eq!(runner.state(), RunState::Done);
        assert_eq!(outcome.trials, 40);
        assert_eq!(*counter.lock().unwrap(), 40 * DEFAULT_REPETITIONS);
        // 20 trials × 3 measured repetitions per (kind, group)
        assert_eq!(outcome.samples, 120);
        assert_eq!(outcome.statistics.get("scalar", "sum").unwrap().sample_count, 60);
        assert_eq!(outcome.statistics.get("simd", "sum").unwrap().sample_count, 60);
    }

    #[test]
    fn test_warmup_repetition_is_discarded() {
        let mut registry = Registry::new();
        registry.register_replicated("matrix", "simd", FnWorkload::new((), |_| Ok(())), 1);

        // Warm-up takes 1 s, measured repetitions 10/20/30 ms
        let clock = ScriptedClock::new(vec![1_000_000_000, 10_000_000, 20_000_000, 30_000_000]);
        let mut runner = Runner::new(registry, config(1)).with_clock(clock);

        let Step::Trial(report) = runner.step().unwrap() else {
            panic!("expected a trial step");
        };
        assert_eq!(report.warmup_ms, 1000.0);
        assert_eq!(report.recorded_ms, vec![10.0, 20.0, 30.0]);

        let Step::Finished(outcome) = runner.step().unwrap() else {
            panic!("expected the run to finish");
        };
        let stat = outcome.statistics.get("simd", "matrix").unwrap();
        assert!((stat.mean - 20.0).abs() < 1e-9);
        assert!((stat.std_dev - (200.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_round_trip() {
        let mut registry = Registry::new();
        registry.register_replicated("g", "k", FnWorkload::new((), |_| Ok(())), 1);

        let mut runner = Runner::new(registry, config(3)).with_clock(SteppingClock::new(0));
        let outcome = runner.run().unwrap();

        let stat = outcome.statistics.get("k", "g").unwrap();
        assert_eq!(stat.mean, 0.0);
        assert_eq!(stat.std_dev, 0.0);
        assert_eq!(stat.sample_count, 3);
    }

    #[test]
    fn test_progress_is_non_decreasing_and_ends_at_100() {
        let reports = Arc::new(Mutex::new(Vec::new()));
        let sink_reports = reports.clone();

        let mut registry = Registry::with_replication(7);
        registry
            .register("a", "scalar", FnWorkload::new((), |_| Ok(())))
            .register("b", "scalar", FnWorkload::new((), |_| Ok(())))
            .register("c", "simd", FnWorkload::new((), |_| Ok(())));

        let mut runner = Runner::new(registry, config(11))
            .with_progress(move |p: u8| sink_reports.lock().unwrap().push(p));
        runner.run().unwrap();

        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 21);
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*reports.last().unwrap(), 100);
    }

    #[test]
    fn test_execute_failure_aborts_run() {
        let reports = Arc::new(Mutex::new(Vec::new()));
        let sink_reports = reports.clone();

        let mut registry = Registry::new();
        let failing = FnWorkload::new(0usize, |calls| {
            *calls += 1;
            if *calls == 2 {
                return Err("execute exploded".into());
            }
            Ok(())
        });
        registry.register_replicated("sum", "simd", failing, 5);

        let mut runner = Runner::new(registry, config(5))
            .with_progress(move |p: u8| sink_reports.lock().unwrap().push(p));

        let err = runner.run().unwrap_err();
        match err {
            RunError::Callable {
                phase, repetition, ..
            } => {
                assert_eq!(phase, Phase::Execute);
                assert_eq!(repetition, 1);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(runner.state(), RunState::Aborted);
        // Only the aborting step reported progress
        assert_eq!(reports.lock().unwrap().len(), 1);
        assert!(matches!(
            runner.step(),
            Err(RunError::InvalidState(RunState::Aborted))
        ));
    }

    #[test]
    fn test_panicking_workload_is_reported() {
        let mut registry = Registry::new();
        registry.register_replicated(
            "sobel",
            "scalar",
            FnWorkload::new((), |_| -> crate::WorkloadResult { panic!("out of bounds") }),
            1,
        );

        let mut runner = Runner::new(registry, config(9));
        match runner.run().unwrap_err() {
            RunError::Panicked { group, message, .. } => {
                assert_eq!(group, "sobel");
                assert!(message.contains("out of bounds"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cleanup_failure_names_phase() {
        let mut registry = Registry::new();
        let workload = FnWorkload::new((), |_| Ok(())).with_cleanup(|_| Err("no canvas".into()));
        registry.register_replicated("sobel", "simd", workload, 2);

        let mut runner = Runner::new(registry, config(2));
        match runner.run().unwrap_err() {
            RunError::Callable {
                phase, repetition, ..
            } => {
                assert_eq!(phase, Phase::Cleanup);
                assert_eq!(repetition, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_state_machine() {
        let mut registry = Registry::new();
        registry.register_replicated("g", "k", FnWorkload::new((), |_| Ok(())), 2);

        let mut runner = Runner::new(registry, config(4));
        assert_eq!(runner.state(), RunState::Idle);

        assert!(matches!(runner.step().unwrap(), Step::Trial(_)));
        assert_eq!(runner.state(), RunState::Running);
        assert!(matches!(runner.step().unwrap(), Step::Trial(_)));
        assert_eq!(runner.state(), RunState::Running);
        assert!(matches!(runner.step().unwrap(), Step::Finished(_)));
        assert_eq!(runner.state(), RunState::Done);

        assert!(matches!(
            runner.run(),
            Err(RunError::InvalidState(RunState::Done))
        ));
    }

    #[test]
    fn test_empty_registry_finalizes_immediately() {
        let mut runner = Runner::new(Registry::new(), config(0));
        let outcome = runner.run().unwrap();
        assert_eq!(outcome.trials, 0);
        assert!(outcome.statistics.is_empty());
    }

    #[test]
    fn test_seeded_order_is_reproducible() {
        fn order(seed: u64) -> Vec<String> {
            let mut registry = Registry::with_replication(4);
            for group in ["multiplication", "sum", "matrix", "sobel"] {
                registry.register(group, "scalar", FnWorkload::new((), |_| Ok(())));
            }
            let mut runner = Runner::new(registry, config(seed));
            let mut groups = Vec::new();
            while let Step::Trial(report) = runner.step().unwrap() {
                groups.push(report.group);
            }
            groups
        }

        assert_eq!(order(42), order(42));
        assert_eq!(order(42).len(), 16);
    }

    #[tokio::test]
    async fn test_run_async() {
        let counter = Arc::new(Mutex::new(0));
        let mut registry = Registry::with_replication(3);
        registry.register("sum", "simd", counting(counter.clone()));

        let mut runner = Runner::new(registry, config(8));
        let outcome = runner.run_async().await.unwrap();

        assert_eq!(outcome.trials, 3);
        assert_eq!(*counter.lock().unwrap(), 3 * DEFAULT_REPETITIONS);
        assert_eq!(runner.state(), RunState::Done);
    }

    #[tokio::test]
    async fn test_run_async_lets_local_tasks_run_between_trials() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = Registry::with_replication(3);
        let trial_log = log.clone();
        registry.register(
            "sum",
            "simd",
            FnWorkload::new((), move |_| {
                trial_log.lock().unwrap().push("trial");
                Ok(())
            }),
        );

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let other_log = log.clone();
                tokio::task::spawn_local(async move {
                    loop {
                        other_log.lock().unwrap().push("other");
                        tokio::task::yield_now().await;
                    }
                });

                let mut runner = Runner::new(registry, config(3));
                runner.run_async().await.unwrap();
            })
            .await;

        // Every trial's repetitions form one uninterrupted run, and the
        // competing task gets in after each of them.
        let log = log.lock().unwrap();
        let runs: Vec<usize> = log
            .split(|entry| *entry == "other")
            .map(|chunk| chunk.len())
            .filter(|&len| len > 0)
            .collect();
        assert_eq!(runs, vec![DEFAULT_REPETITIONS; 3]);
    }

    #[test]
    fn test_sleep_policy_paces_trials() {
        let pause = Duration::from_millis(5);
        let mut registry = Registry::with_replication(4);
        registry.register("sum", "scalar", FnWorkload::new((), |_| Ok(())));

        let mut runner = Runner::new(
            registry,
            RunnerConfig {
                seed: Some(11),
                yield_policy: YieldPolicy::Sleep(pause),
                ..Default::default()
            },
        );
        let start = Instant::now();
        let outcome = runner.run().unwrap();

        assert_eq!(outcome.trials, 4);
        assert!(start.elapsed() >= pause * 4);
    }

    #[test]
    fn test_thread_policy_completes() {
        let counter = Arc::new(Mutex::new(0));
        let mut registry = Registry::with_replication(2);
        registry.register("matrix", "simd", counting(counter.clone()));

        let mut runner = Runner::new(
            registry,
            RunnerConfig {
                seed: Some(12),
                yield_policy: YieldPolicy::Thread,
                ..Default::default()
            },
        );
        assert_eq!(runner.run().unwrap().trials, 2);
        assert_eq!(*counter.lock().unwrap(), 2 * DEFAULT_REPETITIONS);
    }

    #[test]
    fn test_unpinnable_cpu_does_not_stop_the_run() {
        let mut registry = Registry::with_replication(2);
        registry.register("sum", "scalar", FnWorkload::new((), |_| Ok(())));

        let mut runner = Runner::new(
            registry,
            RunnerConfig {
                pin_cpu: Some(5000),
                ..config(13)
            },
        );
        assert_eq!(runner.run().unwrap().trials, 2);
        assert_eq!(runner.state(), RunState::Done);
    }

    /// Sink recording which terminal hook the runner called
    struct Terminal(Arc<Mutex<Vec<&'static str>>>);

    impl ProgressSink for Terminal {
        fn report(&mut self, _percent: u8) {}

        fn finish(&mut self) {
            self.0.lock().unwrap().push("finish");
        }

        fn abandon(&mut self) {
            self.0.lock().unwrap().push("abandon");
        }
    }

    #[test]
    fn test_abort_abandons_progress() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = Registry::new();
        registry.register_replicated(
            "sobel",
            "simd",
            FnWorkload::new((), |_| Err("no canvas".into())),
            3,
        );

        let mut runner =
            Runner::new(registry, config(14)).with_progress(Terminal(events.clone()));
        assert!(runner.run().is_err());
        assert_eq!(runner.state(), RunState::Aborted);
        assert_eq!(*events.lock().unwrap(), vec!["abandon"]);
    }

    #[test]
    fn test_completion_finishes_progress() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = Registry::with_replication(2);
        registry.register("sum", "scalar", FnWorkload::new((), |_| Ok(())));

        let mut runner =
            Runner::new(registry, config(15)).with_progress(Terminal(events.clone()));
        runner.run().unwrap();
        assert_eq!(*events.lock().unwrap(), vec!["finish"]);
    }
}
