use std::ops::{Add, Mul};

///
/// A color in linear scRGB with premultiplied alpha
///
/// This is the color format that layers of a `GraphicPath` are filled with, and the format the
/// compositor blends in. The components are scene-referred linear light, so (1, 1, 1, 1) is
/// opaque SDR white and values above 1.0 are brighter than SDR white.
///
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    ///
    /// Creates a color from premultiplied linear components
    ///
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Rgba {
        Rgba { r, g, b, a }
    }

    ///
    /// An opaque color from linear RGB components
    ///
    #[inline]
    pub fn opaque(r: f32, g: f32, b: f32) -> Rgba {
        Rgba::new(r, g, b, 1.0)
    }

    ///
    /// The fully transparent color
    ///
    #[inline]
    pub fn transparent() -> Rgba {
        Rgba::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl Mul<f32> for Rgba {
    type Output = Rgba;

    #[inline]
    fn mul(self, rhs: f32) -> Rgba {
        Rgba::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl Add<Rgba> for Rgba {
    type Output = Rgba;

    #[inline]
    fn add(self, rhs: Rgba) -> Rgba {
        Rgba::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}
