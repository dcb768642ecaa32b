// file: src/utils/timing.rs
// description: stage timing for pipeline logging

use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct StageTimer {
    stage: String,
    start: Instant,
}

impl StageTimer {
    pub fn new(stage: &str) -> Self {
        debug!("Starting stage: {}", stage);
        Self {
            stage: stage.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed {}: {} items in {:.2}s",
            self.stage,
            count,
            elapsed.as_secs_f64()
        );
        elapsed
    }
}
