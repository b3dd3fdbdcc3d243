//! CPU drawing surface.
//!
//! A `Surface` is a fixed-size RGBA8 framebuffer. The paint loop owns two of
//! them and alternates their roles; sinks only ever see a shared borrow.

use anyhow::{ensure, Result};

use crate::coords::{Point, Rect, Size};
use crate::paint::Color;

const BYTES_PER_PIXEL: usize = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    size: Size,
    /// Row-major RGBA8, `size.area() * 4` bytes.
    pixels: Box<[u8]>,
}

impl Surface {
    /// Allocates a surface cleared to transparent black.
    pub fn new(size: Size) -> Result<Self> {
        ensure!(
            size.is_valid(),
            "surface dimensions must be non-zero, got {}x{}",
            size.width,
            size.height
        );

        let len = size
            .area()
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| anyhow::anyhow!("surface {}x{} is too large", size.width, size.height))?;

        Ok(Self {
            size,
            pixels: vec![0u8; len].into_boxed_slice(),
        })
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The whole surface as a rectangle anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.size.width as i32, self.size.height as i32)
    }

    /// Raw RGBA8 bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the pixel at `p`, or `None` outside the surface.
    pub fn pixel(&self, p: Point) -> Option<Color> {
        if !self.bounds().contains(p) {
            return None;
        }
        let i = self.offset(p.x as usize, p.y as usize);
        let px = &self.pixels[i..i + BYTES_PER_PIXEL];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Overwrites every pixel of `rect` (clipped to the surface) with `color`.
    ///
    /// Empty or fully out-of-bounds rectangles are a no-op.
    pub fn fill(&mut self, rect: Rect, color: Color) {
        let Some(clip) = rect.intersect(self.bounds()) else {
            return;
        };

        let px = color.to_array();
        let (x0, x1) = (clip.min.x as usize, clip.max.x as usize);

        for y in clip.min.y as usize..clip.max.y as usize {
            let start = self.offset(x0, y);
            let end = self.offset(x1, y);
            for chunk in self.pixels[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.size.width as usize + x) * BYTES_PER_PIXEL
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish_non_exhaustive()
    }
}
