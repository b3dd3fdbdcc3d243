use crate::coords::{Point, Rect};

/// Edge length of a figure's bounding square.
const FIGURE_SIZE: i32 = 200;

const HALF: i32 = FIGURE_SIZE / 2;
const BAR_HALF_THICKNESS: i32 = HALF / 3;

/// The two overlapping bars of a plus-shaped figure centered on `center`:
/// the wide-and-short bar first, then the tall-and-narrow one.
#[inline]
pub fn figure_bars(center: Point) -> [Rect; 2] {
    [
        Rect::centered(center, HALF, BAR_HALF_THICKNESS),
        Rect::centered(center, BAR_HALF_THICKNESS, HALF),
    ]
}
