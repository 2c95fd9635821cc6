//! Terminal progress bar fed by the runner's percentage reports

use indicatif::{ProgressBar, ProgressStyle};
use lanebench_core::ProgressSink;

/// `ProgressSink` drawing an indicatif bar from 0 to 100
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Bar drawn to stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message("running trials");
        Self { bar }
    }

    /// Bar that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Current position
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarProgress {
    fn report(&mut self, percent: u8) {
        self.bar.set_position(u64::from(percent.min(100)));
    }

    fn finish(&mut self) {
        self.bar.finish_with_message("done");
    }

    fn abandon(&mut self) {
        self.bar.abandon_with_message("aborted");
    }
}
