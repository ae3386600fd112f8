/// Straight-alpha RGBA color.
///
/// Components are expected in `[0, 1]`. Ring vertices carry this color as-is;
/// the fragment shader outputs it unchanged and the pipeline blends with
/// straight alpha.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Clamps every channel to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 3]> for ColorRgba {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<[f32; 4]> for ColorRgba {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<(f32, f32, f32)> for ColorRgba {
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Self::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(ColorRgba::rgb(0.5, 0.0, 1.0).a, 1.0);
    }

    #[test]
    fn from_tuple_matches_rgb() {
        assert_eq!(ColorRgba::from((1.0, 0.5, 0.0)), ColorRgba::rgb(1.0, 0.5, 0.0));
    }

    #[test]
    fn clamped_limits_channels() {
        let c = ColorRgba::new(-0.2, 1.4, 0.5, 2.0).clamped();
        assert_eq!(c, ColorRgba::new(0.0, 1.0, 0.5, 1.0));
    }

    #[test]
    fn transparent_has_zero_alpha() {
        assert_eq!(ColorRgba::transparent().a, 0.0);
        assert_eq!(ColorRgba::white().with_alpha(0.0).a, 0.0);
    }
}
