//! Trial Progress Reporting
//!
//! The harness reports `(index, total)` as each trial begins. Any
//! `FnMut(usize, usize)` works as a callback; [`BarProgress`] draws a
//! terminal bar and [`SilentProgress`] reports nothing.

use indicatif::{ProgressBar, ProgressStyle};

/// Receiver of per-trial progress
pub trait Progress {
    /// Called once before the first trial
    fn start(&mut self, _total: usize) {}

    /// Called as trial `index` (zero-based) of `total` begins
    fn update(&mut self, index: usize, total: usize);

    /// Called once after the last trial
    fn finish(&mut self) {}

    /// Called instead of `finish` when a candidate aborts the run
    fn abort(&mut self) {
        self.finish()
    }
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn update(&mut self, index: usize, total: usize) {
        self(index, total)
    }
}

/// Progress sink that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn update(&mut self, _index: usize, _total: usize) {}
}

/// Terminal progress bar
#[derive(Debug, Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    /// Create a bar; it is drawn once the run starts
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for BarProgress {
    fn start(&mut self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        self.bar = Some(pb);
    }

    fn update(&mut self, index: usize, _total: usize) {
        if let Some(pb) = &self.bar {
            pb.set_position(index as u64);
        }
    }

    fn finish(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_with_message("Complete");
        }
    }

    fn abort(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.abandon_with_message("Aborted");
        }
    }
}
