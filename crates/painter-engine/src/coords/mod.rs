//! Pixel-space geometry shared by operations, state and the painter.
//!
//! Canonical space:
//! - integer pixels of the drawing surface
//! - origin top-left
//! - +X right, +Y down

mod point;
mod rect;
mod size;

pub use point::Point;
pub use rect::Rect;
pub use size::Size;
