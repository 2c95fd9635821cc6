//! Workloads
//!
//! A workload is the unit a trial measures. It owns whatever scratch state
//! its three phases share: `prepare` builds inputs, `execute` is the timed
//! part, `cleanup` runs after the end timestamp.

/// Error returned by a workload phase
pub type WorkloadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a workload phase
pub type WorkloadResult = Result<(), WorkloadError>;

/// A benchmarkable piece of work with untimed setup and teardown.
///
/// Every phase may be called many times: once per repetition, for every
/// replica of the registration.
pub trait Workload {
    /// Untimed setup before each measured execution
    fn prepare(&mut self) -> WorkloadResult {
        Ok(())
    }

    /// The measured operation
    fn execute(&mut self) -> WorkloadResult;

    /// Untimed teardown after each measured execution
    fn cleanup(&mut self) -> WorkloadResult {
        Ok(())
    }
}

type Phase<S> = Box<dyn FnMut(&mut S) -> WorkloadResult + Send>;

/// Closure-backed workload sharing an explicit state value between phases.
///
/// ```
/// use lanebench_core::FnWorkload;
///
/// let workload = FnWorkload::new(Vec::<f32>::new(), |v: &mut Vec<f32>| {
///     let total: f32 = v.iter().sum();
///     std::hint::black_box(total);
///     Ok(())
/// })
/// .with_prepare(|v| {
///     *v = (0..1024).map(|i| i as f32).collect();
///     Ok(())
/// });
/// # let _ = workload;
/// ```
pub struct FnWorkload<S> {
    state: S,
    prepare: Option<Phase<S>>,
    execute: Phase<S>,
    cleanup: Option<Phase<S>>,
}

impl<S> FnWorkload<S> {
    /// Create a workload from its state and measured closure
    pub fn new<E>(state: S, execute: E) -> Self
    where
        E: FnMut(&mut S) -> WorkloadResult + Send + 'static,
    {
        Self {
            state,
            prepare: None,
            execute: Box::new(execute),
            cleanup: None,
        }
    }

    /// Attach an untimed setup closure
    pub fn with_prepare<P>(mut self, prepare: P) -> Self
    where
        P: FnMut(&mut S) -> WorkloadResult + Send + 'static,
    {
        self.prepare = Some(Box::new(prepare));
        self
    }

    /// Attach an untimed teardown closure
    pub fn with_cleanup<C>(mut self, cleanup: C) -> Self
    where
        C: FnMut(&mut S) -> WorkloadResult + Send + 'static,
    {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// Shared state
    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S> Workload for FnWorkload<S> {
    fn prepare(&mut self) -> WorkloadResult {
        match self.prepare.as_mut() {
            Some(prepare) => prepare(&mut self.state),
            None => Ok(()),
        }
    }

    fn execute(&mut self) -> WorkloadResult {
        (self.execute)(&mut self.state)
    }

    fn cleanup(&mut self) -> WorkloadResult {
        match self.cleanup.as_mut() {
            Some(cleanup) => cleanup(&mut self.state),
            None => Ok(()),
        }
    }
}
