use super::Point;

/// Surface dimensions in pixels.
///
/// Fractional coordinates coming from the command protocol are resolved
/// against a `Size` at apply time, never at parse time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Resolves a fractional position (`0.0..=1.0` spans the surface) to pixels.
    ///
    /// Truncates toward zero; values outside `[0, 1]` resolve outside the
    /// surface and are clipped later by the painter.
    #[inline]
    pub fn to_pixels(self, fx: f64, fy: f64) -> Point {
        Point::new(scale(fx, self.width), scale(fy, self.height))
    }
}

#[inline]
fn scale(fraction: f64, extent: u32) -> i32 {
    // `as` saturates for out-of-range floats and maps NaN to 0.
    (fraction * f64::from(extent)) as i32
}
