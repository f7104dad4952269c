/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a color from a packed `0xAARRGGBB` value (straight alpha).
    #[inline]
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_srgb_u8(r, g, b, a)
    }

    /// Creates a premultiplied color from straight bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Component-wise interpolation in premultiplied space.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Quantizes to premultiplied RGBA8 texel bytes, as stored in the gradient atlas.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_is_premultiplied() {
        let c = Color::from_argb(0x80ff0000);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
    }

    #[test]
    fn lerp_midpoint() {
        let c = Color::black().lerp(Color::white(), 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn rgba8_rounds() {
        assert_eq!(Color::white().to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::transparent().to_rgba8(), [0, 0, 0, 0]);
    }
}
