use std::time::Instant;

use tracing::debug;

/// Measure the time between when this value is allocated
/// and when it is dropped.
pub struct Timer {
    name: &'static str,
    start: Instant,
}

impl Timer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_millis();

        debug!(elapsed_ms = elapsed as u64, "{} finished", self.name);
    }
}
