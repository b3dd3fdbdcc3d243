//! Time subsystem.
//!
//! Publish timing for the paint loop, kept separate from the loop so it can be
//! tested without threads.
//! Intended usage:
//! - one `FrameClock` per loop run
//! - call `tick()` once per published frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
