//! Color model for the scene and the drawing surface.
//!
//! Scope:
//! - straight RGBA8 colors (the surface pixel format)
//! - the fixed palette used by the scene painter
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;

/// Background of a freshly started or reset scene.
pub const DEFAULT_BACKGROUND: Color = Color::BLACK;

/// Fill used for the highlight cut-out.
pub const CLEAR_COLOR: Color = Color::BLACK;

/// Fill used for figures.
pub const FIGURE_COLOR: Color = Color::YELLOW;
