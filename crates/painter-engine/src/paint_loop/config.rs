use std::time::Duration;

use crate::coords::Size;
use crate::queue::DEFAULT_CAPACITY;

/// Paint loop configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Dimensions of both drawing surfaces, fixed for the lifetime of a run.
    pub size: Size,
    /// Maximum number of queued operations before `post` blocks.
    pub queue_capacity: usize,
    /// Upper bound on how long the idle consumer waits before re-checking
    /// for a stop request.
    pub poll_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            size: Size::new(800, 800),
            queue_capacity: DEFAULT_CAPACITY,
            poll_interval: Duration::from_millis(100),
        }
    }
}
