//! Progress Reporting
//!
//! The runner reports one integer percentage per scheduling step.

/// Consumer of per-step progress percentages (0-100)
pub trait ProgressSink {
    /// Receive the percentage after a trial has been picked
    fn report(&mut self, percent: u8);

    /// Called once when the run reaches `Done`
    fn finish(&mut self) {}

    /// Called once when the run reaches `Aborted`
    fn abandon(&mut self) {}
}

/// Sink that ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(u8),
{
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// `100 - floor(remaining / total * 100)`, computed in integers.
///
/// `remaining` is the pending-set size after the current trial was removed.
/// Returns 100 for an empty run.
pub fn progress_percent(remaining: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let remaining = remaining.min(total) as u128;
    let done_floor = remaining * 100 / total as u128;
    (100 - done_floor) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 80), 100);
        assert_eq!(progress_percent(79, 80), 2); // floor(98.75) = 98
        assert_eq!(progress_percent(40, 80), 50);
        assert_eq!(progress_percent(1, 3), 67); // floor(33.3) = 33
        assert_eq!(progress_percent(0, 0), 100);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let total = 137;
        let mut last = 0;
        for remaining in (0..total).rev() {
            let p = progress_percent(remaining, total);
            assert!(p >= last);
            last = p;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: u8| seen.push(p);
            sink.report(10);
            sink.report(20);
        }
        assert_eq!(seen, vec![10, 20]);
    }
}
