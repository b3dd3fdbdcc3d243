//! Scene painter.
//!
//! Turns a [`State`] into pixels. This is the full repaint the paint loop runs
//! before every publish; it is not an operation producers can post.
//!
//! Paint order:
//! 1. background over the whole surface
//! 2. highlight region in the clear color (a cut-out)
//! 3. one plus-shaped figure per center, in insertion order

mod figure;

pub use figure::figure_bars;

use crate::paint::{CLEAR_COLOR, FIGURE_COLOR};
use crate::scene::State;
use crate::surface::Surface;

/// Repaints `surface` entirely from `state`.
///
/// Deterministic and idempotent: the result depends only on `state` and the
/// surface size, never on previous surface contents.
pub fn repaint(surface: &mut Surface, state: &State) {
    surface.fill(surface.bounds(), state.background);

    if let Some(rect) = state.highlight {
        surface.fill(rect, CLEAR_COLOR);
    }

    for &center in &state.figures {
        for bar in figure_bars(center) {
            surface.fill(bar, FIGURE_COLOR);
        }
    }
}
