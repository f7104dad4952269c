use crate::atlas::GradientHandle;
use crate::coords::Vec2;

use super::{Color, LinearGradient, SpreadMode};

/// Logical fill description, prior to atlas resolution.
///
/// Theme references are resolved by the canvas into one of these variants
/// before they reach a region.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl Brush {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Brush::Solid(color)
    }

    #[inline]
    pub fn from_argb(argb: u32) -> Self {
        Brush::Solid(Color::from_argb(argb))
    }

    #[inline]
    pub fn linear(gradient: LinearGradient) -> Self {
        Brush::LinearGradient(gradient)
    }

    /// Texels written into a gradient atlas row for this brush.
    pub fn sample_row(&self, resolution: usize) -> Vec<Color> {
        match self {
            Brush::Solid(c) => vec![*c; resolution],
            Brush::LinearGradient(g) => g.sample_row(resolution),
        }
    }

    /// Gradient axis in region-local space. Solid brushes use a degenerate axis.
    pub fn axis(&self) -> (Vec2, Vec2, SpreadMode) {
        match self {
            Brush::Solid(_) => (Vec2::zero(), Vec2::zero(), SpreadMode::Pad),
            Brush::LinearGradient(g) => (g.start, g.end, g.spread),
        }
    }

    /// Blends two brushes. Two solids stay solid; anything else becomes a gradient
    /// whose axis is taken from whichever side has one.
    pub fn interpolate_with(&self, other: &Brush, t: f32) -> Brush {
        match (self, other) {
            (Brush::Solid(a), Brush::Solid(b)) => Brush::Solid(a.lerp(*b, t)),
            (Brush::LinearGradient(a), Brush::LinearGradient(b)) => {
                Brush::LinearGradient(a.interpolate_with(b, t))
            }
            (Brush::Solid(a), Brush::LinearGradient(g)) => {
                let from = LinearGradient::from_colors(g.start, g.end, &[*a, *a]);
                Brush::LinearGradient(from.interpolate_with(g, t))
            }
            (Brush::LinearGradient(g), Brush::Solid(b)) => {
                let to = LinearGradient::from_colors(g.start, g.end, &[*b, *b]);
                Brush::LinearGradient(g.interpolate_with(&to, t))
            }
        }
    }
}

impl From<Color> for Brush {
    #[inline]
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

/// Brush resolved to gradient atlas coordinates.
///
/// Owned by the region that resolved it and valid until that region is cleared.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PackedBrush {
    pub gradient: GradientHandle,
    pub start: Vec2,
    pub end: Vec2,
    pub spread: SpreadMode,
}
