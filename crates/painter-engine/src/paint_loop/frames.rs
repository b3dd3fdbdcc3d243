use anyhow::Result;

use crate::coords::Size;
use crate::surface::Surface;

/// Double buffer owned by the consumer.
///
/// Operations and repaints target `active`; after a publish the roles swap so
/// the next frame is drawn into the surface the sink saw one publish earlier.
pub(crate) struct FramePair {
    active: Surface,
    standby: Surface,
}

impl FramePair {
    pub(crate) fn new(size: Size) -> Result<Self> {
        Ok(Self {
            active: Surface::new(size)?,
            standby: Surface::new(size)?,
        })
    }

    #[inline]
    pub(crate) fn active(&self) -> &Surface {
        &self.active
    }

    #[inline]
    pub(crate) fn active_mut(&mut self) -> &mut Surface {
        &mut self.active
    }

    #[inline]
    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.active, &mut self.standby);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Point, Rect};
    use crate::paint::Color;

    #[test]
    fn swap_alternates_targets() {
        let mut frames = FramePair::new(Size::new(4, 4)).unwrap();
        frames.active_mut().fill(Rect::new(0, 0, 4, 4), Color::WHITE);
        frames.swap();
        assert_ne!(frames.active().pixel(Point::zero()), Some(Color::WHITE));
        frames.swap();
        assert_eq!(frames.active().pixel(Point::zero()), Some(Color::WHITE));
    }

    #[test]
    fn invalid_size_fails() {
        assert!(FramePair::new(Size::new(0, 0)).is_err());
    }
}
