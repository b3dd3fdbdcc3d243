use std::time::{Duration, Instant};

/// Timing snapshot for one published frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic publish counter, starting at 0 for each run.
    pub frame_index: u64,

    /// Time since the previous publish, `None` for the first frame of a run.
    pub since_last: Option<Duration>,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,
}

/// Publish clock owned by the paint loop's consumer.
///
/// Ticks only when a frame is handed to the sink, so idle periods show up as
/// a long `since_last` rather than as empty frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the previous publish; the next tick starts a new run at index 0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of frames ticked since construction or the last reset.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Records a publish and returns its timing.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();

        let ft = FrameTime {
            frame_index: self.frame_index,
            since_last: self.last.map(|last| now.saturating_duration_since(last)),
            now,
        };

        self.last = Some(now);
        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}
