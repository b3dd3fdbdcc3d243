use super::Point;

/// Axis-aligned pixel rectangle, half-open: `[min, max)`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Builds a rectangle from two opposite corners in any order.
    #[inline]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Rectangle of `2 * half_w` by `2 * half_h` centered on `center`.
    #[inline]
    pub fn centered(center: Point, half_w: i32, half_h: i32) -> Self {
        Self::from_corners(
            center - Point::new(half_w, half_h),
            center + Point::new(half_w, half_h),
        )
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max.x && p.y < self.max.y
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let r = Rect::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        );

        if r.is_empty() { None } else { Some(r) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect { Rect::new(x0, y0, x1, y1) }

    // ── from_corners ──────────────────────────────────────────────────────

    #[test]
    fn from_corners_ordered_is_identity() {
        let rect = Rect::from_corners(Point::new(1, 2), Point::new(10, 20));
        assert_eq!(rect, r(1, 2, 10, 20));
    }

    #[test]
    fn from_corners_swapped() {
        let rect = Rect::from_corners(Point::new(600, 600), Point::new(200, 100));
        assert_eq!(rect, r(200, 100, 600, 600));
    }

    #[test]
    fn centered_spans_both_sides() {
        let rect = Rect::centered(Point::new(400, 400), 100, 33);
        assert_eq!(rect, r(300, 367, 500, 433));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0, 0, 10, 10).contains(Point::new(0, 0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0, 0, 10, 10).contains(Point::new(10, 10)));
        assert!(r(0, 0, 10, 10).contains(Point::new(9, 9)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        assert_eq!(r(0, 0, 10, 10).intersect(r(5, 5, 15, 15)), Some(r(5, 5, 10, 10)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0, 0, 10, 10).intersect(r(10, 0, 20, 10)).is_none());
    }

    #[test]
    fn intersect_disjoint_returns_none() {
        assert!(r(0, 0, 5, 5).intersect(r(-20, -20, -1, -1)).is_none());
    }

    #[test]
    fn is_empty_zero_size() {
        assert!(r(3, 3, 3, 9).is_empty());
        assert!(!r(0, 0, 1, 1).is_empty());
    }
}
