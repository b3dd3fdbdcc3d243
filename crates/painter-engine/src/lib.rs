//! Painter engine crate.
//!
//! Owns the command-processing core: the operation model, the scene state,
//! the drawing surfaces and the paint loop that ties them together.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`coords`] | `Point`, `Rect`, `Size` |
//! | [`paint`] | `Color` and the scene palette |
//! | [`surface`] | `Surface` RGBA8 framebuffer |
//! | [`scene`] | `State` |
//! | [`op`] | `Operation`, `DrawHook` |
//! | [`render`] | full scene repaint |
//! | [`queue`] | `CommandQueue` |
//! | [`paint_loop`] | `PaintLoop`, `LoopConfig`, `Phase` |
//! | [`sink`] | `RenderSink` |
//!
//! # Quick start
//!
//! ```rust
//! use painter_engine::{LoopConfig, Operation, PaintLoop, Surface};
//!
//! let paint_loop = PaintLoop::new(LoopConfig::default(), |frame: &Surface| {
//!     println!("frame {}x{}", frame.size().width, frame.size().height);
//! });
//! paint_loop.start().unwrap();
//! paint_loop.post_all([Operation::white(), Operation::RequestUpdate]);
//! paint_loop.stop_and_wait();
//! ```

pub mod coords;
pub mod logging;
pub mod op;
pub mod paint;
pub mod paint_loop;
pub mod queue;
pub mod render;
pub mod scene;
pub mod sink;
pub mod surface;
pub mod time;

pub use op::Operation;
pub use paint_loop::{LoopConfig, PaintLoop, Phase};
pub use scene::State;
pub use sink::RenderSink;
pub use surface::Surface;
