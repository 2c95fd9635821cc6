//! Runner Errors

use crate::runner::RunState;
use crate::workload::WorkloadError;
use thiserror::Error;

/// Workload phase that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Untimed setup
    Prepare,
    /// Measured execution
    Execute,
    /// Untimed teardown
    Cleanup,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Prepare => write!(f, "prepare"),
            Phase::Execute => write!(f, "execute"),
            Phase::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum RunError {
    /// A workload phase returned an error
    #[error("{phase} failed for {group}/{kind} on repetition {repetition}: {source}")]
    Callable {
        /// Failing phase
        phase: Phase,
        /// Workload label
        group: String,
        /// Implementation variant label
        kind: String,
        /// Zero-based repetition index within the trial
        repetition: usize,
        /// Error returned by the workload
        #[source]
        source: WorkloadError,
    },

    /// A workload phase panicked
    #[error("{group}/{kind} panicked: {message}")]
    Panicked {
        /// Workload label
        group: String,
        /// Implementation variant label
        kind: String,
        /// Panic payload, when it was a string
        message: String,
    },

    /// The runner was stepped after it finished or aborted
    #[error("runner cannot step from state {0:?}")]
    InvalidState(RunState),
}
