//! Pure shape builders.
//!
//! Every builder takes the drawing state explicitly plus shape parameters in
//! region-local units and returns finished [`Shape`](crate::scene::Shape)
//! descriptors:
//! 1. the bounding box covers the shape plus anti-aliasing, thickness or blur padding
//! 2. defining points are re-expressed in a `[-1, 1]` frame over that box
//! 3. the state's clamp travels with the shape; fully clamped shapes are culled
//!    when queued, not here
//!
//! Fallbacks for degenerate input are chosen by the small classification
//! functions in this module so they can be tested without a canvas.

mod curves;
mod media;
mod rects;
mod round;
mod triangles;

pub use curves::{
    arc, flat_arc, flat_arc_shadow, quadratic, rounded_arc, rounded_arc_shadow, segment,
};
pub use media::{image, line, line_fill, shader, text};
pub use rects::{
    bottom_rounded_rectangle, fill, left_rounded_rectangle, rectangle, rectangle_border,
    rectangle_shadow, right_rounded_rectangle, rounded_rectangle, rounded_rectangle_border,
    rounded_rectangle_shadow, top_rounded_rectangle,
};
pub use round::{circle, diamond, fade_circle, ring, squircle, squircle_border, super_ellipse};
pub use triangles::{
    rounded_triangle, rounded_triangle_border, triangle, triangle_border, triangle_down,
    triangle_left, triangle_right, triangle_up,
};

use crate::coords::{Rect, Vec2};

/// Second-difference threshold under which a quadratic is drawn as a segment.
pub const LINEAR_THRESHOLD: f32 = 0.01;

/// Default squircle exponent.
pub const DEFAULT_SQUIRCLE_POWER: f32 = 4.0;

/// Smallest rounding a rounded rectangle or diamond is drawn with.
pub const MIN_ROUNDING: f32 = 1.0;

/// How a quadratic curve is rendered.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CurveClass {
    /// Visually straight: render the segment from the first to the last point.
    Straight,
    Curved,
}

/// Classifies a quadratic by its second finite difference `a - 2b + c`.
pub fn classify_quadratic(a: Vec2, b: Vec2, c: Vec2) -> CurveClass {
    let dx = a.x - 2.0 * b.x + c.x;
    let dy = a.y - 2.0 * b.y + c.y;
    if dx.abs() <= LINEAR_THRESHOLD && dy.abs() <= LINEAR_THRESHOLD {
        CurveClass::Straight
    } else {
        CurveClass::Curved
    }
}

/// Which primitive a rounded-rectangle shadow uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShadowClass {
    Rectangle,
    RoundedRectangle,
}

/// Roundings at or below [`MIN_ROUNDING`] are indistinguishable from square corners.
pub fn classify_shadow(rounding: f32) -> ShadowClass {
    if rounding <= MIN_ROUNDING {
        ShadowClass::Rectangle
    } else {
        ShadowClass::RoundedRectangle
    }
}

/// Incenter and inradius of triangle `a, b, c`.
///
/// The incenter is the side-length weighted average of the opposite vertices;
/// the inradius is Heron's area over the semiperimeter. Degenerate triangles
/// have a zero inradius.
pub fn incircle(a: Vec2, b: Vec2, c: Vec2) -> (Vec2, f32) {
    let d_ab = a.distance(b);
    let d_bc = b.distance(c);
    let d_ca = c.distance(a);
    let perimeter = d_ab + d_bc + d_ca;
    if perimeter <= f32::EPSILON {
        return (a, 0.0);
    }

    let center = (a * d_bc + b * d_ca + c * d_ab) / perimeter;
    let s = perimeter * 0.5;
    let area_sq = s * (s - d_ab) * (s - d_bc) * (s - d_ca);
    (center, area_sq.max(0.0).sqrt() / s)
}

/// Rounding actually applied to a triangle: never more than its inradius.
#[inline]
pub fn clamp_triangle_rounding(requested: f32, inradius: f32) -> f32 {
    requested.min(inradius).max(0.0)
}

/// Box around `points`, grown by `pad` on every side.
pub(crate) fn bounding_box(points: &[Vec2], pad: f32) -> Rect {
    let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
    let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for &p in points {
        min = min.min(p);
        max = max.max(p);
    }
    Rect::from_edges(min.x - pad, min.y - pad, max.x + pad, max.y + pad)
}

/// Maps `p` into the `[-1, 1]` frame of `bbox`. Zero-sized axes map to 0.
#[inline]
pub(crate) fn normalize(p: Vec2, bbox: Rect) -> Vec2 {
    let axis = |v: f32, origin: f32, size: f32| {
        if size > 0.0 { 2.0 * (v - origin) / size - 1.0 } else { 0.0 }
    };
    Vec2::new(axis(p.x, bbox.x(), bbox.width()), axis(p.y, bbox.y(), bbox.height()))
}
