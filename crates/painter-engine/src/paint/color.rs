/// Straight-alpha RGBA color with 8 bits per channel.
///
/// This is the storage format of [`Surface`](crate::surface::Surface) pixels, so
/// a fill is a plain copy with no blending.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xff)
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_are_opaque() {
        for c in [Color::BLACK, Color::WHITE, Color::GREEN, Color::YELLOW] {
            assert_eq!(c.a, 0xff);
        }
    }

    #[test]
    fn array_is_rgba_order() {
        assert_eq!(Color::YELLOW.to_array(), [0xff, 0xff, 0x00, 0xff]);
    }
}
