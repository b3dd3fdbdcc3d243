use crate::coords::{Point, Rect};
use crate::paint::{Color, DEFAULT_BACKGROUND};

/// Mutable scene record driven by [`Operation`](crate::op::Operation)s.
///
/// Ownership:
/// - created by the paint loop on start
/// - read and written only on the loop's consumer thread
///
/// All positions are already resolved to surface pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub background: Color,
    /// Region painted with the clear color on top of the background.
    pub highlight: Option<Rect>,
    /// Figure centers in insertion order. Duplicates are allowed.
    pub figures: Vec<Point>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            highlight: None,
            figures: Vec::new(),
        }
    }
}

impl State {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores background, highlight and figures to their defaults.
    ///
    /// Keeps the figure buffer's capacity.
    pub fn reset(&mut self) {
        self.background = DEFAULT_BACKGROUND;
        self.highlight = None;
        self.figures.clear();
    }

    #[inline]
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    #[inline]
    pub fn set_highlight(&mut self, rect: Rect) {
        self.highlight = Some(rect);
    }

    #[inline]
    pub fn add_figure(&mut self, center: Point) {
        self.figures.push(center);
    }

    /// Translates every figure by `delta`.
    pub fn move_figures(&mut self, delta: Point) {
        for center in &mut self.figures {
            *center += delta;
        }
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
