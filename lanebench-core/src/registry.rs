//! Trial Registry
//!
//! Registrations are (group, kind, workload, replication) records. Running a
//! registry expands every registration into `replication` pending trials that
//! all share the registration's workload; the runner consumes them in random
//! order, so registration order never affects the outcome.

use crate::workload::Workload;

/// Number of trial copies scheduled per registration unless overridden
pub const DEFAULT_REPLICATION: usize = 20;

/// One registered benchmark
pub struct Registration {
    group: String,
    kind: String,
    replication: usize,
    workload: Box<dyn Workload + Send>,
}

impl Registration {
    /// Workload label
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Implementation variant label
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Number of pending trials this registration contributes
    pub fn replication(&self) -> usize {
        self.replication
    }

    pub(crate) fn workload_mut(&mut self) -> &mut (dyn Workload + Send) {
        self.workload.as_mut()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("group", &self.group)
            .field("kind", &self.kind)
            .field("replication", &self.replication)
            .finish_non_exhaustive()
    }
}

/// Collection of registered benchmarks
#[derive(Debug)]
pub struct Registry {
    registrations: Vec<Registration>,
    default_replication: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry using `DEFAULT_REPLICATION`
    pub fn new() -> Self {
        Self::with_replication(DEFAULT_REPLICATION)
    }

    /// Create an empty registry with a custom default replication factor
    pub fn with_replication(default_replication: usize) -> Self {
        Self {
            registrations: Vec::new(),
            default_replication,
        }
    }

    /// Register a workload with the registry's default replication
    pub fn register<W>(
        &mut self,
        group: impl Into<String>,
        kind: impl Into<String>,
        workload: W,
    ) -> &mut Self
    where
        W: Workload + Send + 'static,
    {
        let replication = self.default_replication;
        self.register_replicated(group, kind, workload, replication)
    }

    /// Register a workload scheduled exactly `replication` times
    pub fn register_replicated<W>(
        &mut self,
        group: impl Into<String>,
        kind: impl Into<String>,
        workload: W,
        replication: usize,
    ) -> &mut Self
    where
        W: Workload + Send + 'static,
    {
        self.registrations.push(Registration {
            group: group.into(),
            kind: kind.into(),
            replication,
            workload: Box::new(workload),
        });
        self
    }

    /// Keep only registrations whose (group, kind) satisfy the predicate
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.registrations.retain(|r| keep(&r.group, &r.kind));
    }

    /// Registrations in insertion order
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Size of the pending set a run of this registry starts with
    pub fn total_trials(&self) -> usize {
        self.registrations.iter().map(|r| r.replication).sum()
    }

    /// Expand registrations into the initial pending set of registration indices
    pub(crate) fn pending_set(&self) -> Vec<usize> {
        let mut pending = Vec::with_capacity(self.total_trials());
        for (index, registration) in self.registrations.iter().enumerate() {
            pending.extend(std::iter::repeat_n(index, registration.replication));
        }
        pending
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Registration {
        &mut self.registrations[index]
    }
}
