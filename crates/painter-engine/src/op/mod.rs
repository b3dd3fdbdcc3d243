//! Operation model.
//!
//! An [`Operation`] is a pure description of an effect on the scene. The
//! paint loop applies operations one at a time on its consumer thread:
//!
//! - scene variants mutate [`State`] only and never request a publish
//! - [`Operation::RequestUpdate`] mutates nothing and always requests one
//! - [`Operation::Composite`] applies its members in order and requests a
//!   publish if any member did
//!
//! Operations cannot fail once built. Validation happens in the command
//! source (see `painter-lang`).
//!
//! Extending the model:
//! - add a variant here
//! - add its arm to [`Operation::apply`]
//! - add the keyword to the script parser if it belongs to the protocol

mod hook;

pub use hook::DrawHook;

use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::State;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    SetBackground(Color),
    /// Corners as fractions of the surface size.
    SetHighlightRegion { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Center as fractions of the surface size.
    AddFigure { x: f64, y: f64 },
    /// Offset as fractions of the surface size.
    MoveFigures { dx: f64, dy: f64 },
    Reset,
    RequestUpdate,
    Composite(Vec<Operation>),
    /// Internal draw callback. Never produced by the script parser.
    Custom(DrawHook),
}

impl Operation {
    #[inline]
    pub fn white() -> Self {
        Operation::SetBackground(Color::WHITE)
    }

    #[inline]
    pub fn green() -> Self {
        Operation::SetBackground(Color::GREEN)
    }

    pub fn composite(ops: impl IntoIterator<Item = Operation>) -> Self {
        Operation::Composite(ops.into_iter().collect())
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut Surface) + Send + Sync + 'static,
    {
        Operation::Custom(DrawHook::new(f))
    }

    /// Applies the operation and reports whether a publish is needed.
    ///
    /// Fractional coordinates are resolved against `surface`'s current size.
    pub fn apply(&self, surface: &mut Surface, state: &mut State) -> bool {
        let size = surface.size();

        match self {
            Operation::SetBackground(color) => {
                state.set_background(*color);
                false
            }
            Operation::SetHighlightRegion { x1, y1, x2, y2 } => {
                let a = size.to_pixels(*x1, *y1);
                let b = size.to_pixels(*x2, *y2);
                state.set_highlight(Rect::from_corners(a, b));
                false
            }
            Operation::AddFigure { x, y } => {
                state.add_figure(size.to_pixels(*x, *y));
                false
            }
            Operation::MoveFigures { dx, dy } => {
                state.move_figures(size.to_pixels(*dx, *dy));
                false
            }
            Operation::Reset => {
                state.reset();
                false
            }
            Operation::RequestUpdate => true,
            Operation::Composite(ops) => {
                let mut needs_publish = false;
                for op in ops {
                    // No short-circuit: every member runs.
                    needs_publish |= op.apply(surface, state);
                }
                needs_publish
            }
            Operation::Custom(hook) => {
                hook.call(surface);
                false
            }
        }
    }
}
