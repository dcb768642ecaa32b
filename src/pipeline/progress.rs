// file: src/pipeline/progress.rs
// description: live load progress and the statistics reported after a load
// reference: indicatif bar driven by atomic counters shared across workers

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

const COLORED_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
const PLAIN_TEMPLATE: &str = "[{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineStats {
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub total_bytes_processed: u64,
    pub duration_ms: u64,
}

impl PipelineStats {
    pub fn files_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.files_loaded as f64 * 1000.0 / self.duration_ms as f64
    }

    /// Percentage of visited files that parsed; 0 for an empty corpus.
    pub fn success_rate(&self) -> f64 {
        let total = self.files_loaded + self.files_skipped;
        if total == 0 {
            return 0.0;
        }
        self.files_loaded as f64 * 100.0 / total as f64
    }
}

/// Shared by reference (or `Arc`) between load tasks; every method takes `&self`.
pub struct ProgressTracker {
    bar: ProgressBar,
    loaded: AtomicUsize,
    skipped: AtomicUsize,
    bytes: AtomicU64,
    started: Instant,
}

impl ProgressTracker {
    /// Draws to stderr, colored when `colored` output is enabled.
    pub fn new(total_files: usize) -> Self {
        let bar = ProgressBar::new(total_files as u64);
        let colored = colored::control::SHOULD_COLORIZE.should_colorize();
        let template = if colored { COLORED_TEMPLATE } else { PLAIN_TEMPLATE };
        bar.set_style(
            ProgressStyle::with_template(template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Self::with_bar(bar)
    }

    /// Counts without drawing anything; used when progress output is disabled.
    pub fn hidden(total_files: usize) -> Self {
        Self::with_bar(ProgressBar::with_draw_target(
            Some(total_files as u64),
            ProgressDrawTarget::hidden(),
        ))
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            loaded: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            bytes: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn inc_files_loaded(&self) {
        self.loaded.fetch_add(1, Ordering::SeqCst);
        self.tick();
    }

    pub fn inc_files_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
        self.tick();
    }

    pub fn add_bytes_processed(&self, bytes: u64) {
        self.bytes.fetch_add(bytes, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_with_message(self.summary());
        }
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            files_loaded: self.loaded.load(Ordering::SeqCst),
            files_skipped: self.skipped.load(Ordering::SeqCst),
            total_bytes_processed: self.bytes.load(Ordering::SeqCst),
            duration_ms: self.started.elapsed().as_millis() as u64,
        }
    }

    /// Position on the bar, i.e. files finished so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    fn tick(&self) {
        self.bar.inc(1);
        self.bar.set_message(self.summary());
    }

    fn summary(&self) -> String {
        format!(
            "{} loaded, {} skipped",
            self.loaded.load(Ordering::SeqCst),
            self.skipped.load(Ordering::SeqCst)
        )
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}
