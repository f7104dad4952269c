//! Triangles, including the rounded and arrow-head variants.

use crate::canvas::DrawState;
use crate::coords::Vec2;
use crate::scene::{Shape, ShapeKind};

use super::{bounding_box, clamp_triangle_rounding, incircle, normalize};

/// Core triangle builder: the box is padded by `rounding` on every side.
fn outer_rounded_triangle_border(
    state: &DrawState,
    a: Vec2,
    b: Vec2,
    c: Vec2,
    rounding: f32,
    thickness: f32,
) -> Shape {
    let bbox = bounding_box(&[a, b, c], rounding);
    let kind = ShapeKind::Triangle {
        a: normalize(a, bbox),
        b: normalize(b, bbox),
        c: normalize(c, bbox),
        rounding,
        thickness: thickness + 1.0,
    };
    state.shape(kind, bbox.x(), bbox.y(), bbox.width(), bbox.height())
}

/// Thickness large enough that a border fills the whole triangle.
fn filling_thickness(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    a.distance(b).max(a.distance(c))
}

pub fn triangle_border(state: &DrawState, a: Vec2, b: Vec2, c: Vec2, thickness: f32) -> Shape {
    outer_rounded_triangle_border(state, a, b, c, 0.0, thickness)
}

pub fn triangle(state: &DrawState, a: Vec2, b: Vec2, c: Vec2) -> Shape {
    outer_rounded_triangle_border(state, a, b, c, 0.0, filling_thickness(a, b, c))
}

/// Triangle border with rounded corners.
///
/// Rounding is clamped to the inradius; vertices are pulled toward the
/// incenter by `rounding / inradius` so the rounded outline keeps the
/// requested extent.
pub fn rounded_triangle_border(
    state: &DrawState,
    a: Vec2,
    b: Vec2,
    c: Vec2,
    rounding: f32,
    thickness: f32,
) -> Shape {
    let (center, inradius) = incircle(a, b, c);
    let rounding = clamp_triangle_rounding(rounding, inradius);
    let shrinking = if inradius > 0.0 { rounding / inradius } else { 0.0 };

    outer_rounded_triangle_border(
        state,
        a.lerp(center, shrinking),
        b.lerp(center, shrinking),
        c.lerp(center, shrinking),
        rounding,
        thickness,
    )
}

pub fn rounded_triangle(state: &DrawState, a: Vec2, b: Vec2, c: Vec2, rounding: f32) -> Shape {
    rounded_triangle_border(state, a, b, c, rounding, filling_thickness(a, b, c))
}

/// Arrow head pointing left, `width` wide and `2 * width` tall.
pub fn triangle_left(state: &DrawState, x: f32, y: f32, width: f32) -> Shape {
    let h = width * 2.0;
    outer_rounded_triangle_border(
        state,
        Vec2::new(x + width, y),
        Vec2::new(x + width, y + h),
        Vec2::new(x, y + h * 0.5),
        0.0,
        width,
    )
}

/// Arrow head pointing right, `width` wide and `2 * width` tall.
pub fn triangle_right(state: &DrawState, x: f32, y: f32, width: f32) -> Shape {
    let h = width * 2.0;
    outer_rounded_triangle_border(
        state,
        Vec2::new(x, y),
        Vec2::new(x, y + h),
        Vec2::new(x + width, y + h * 0.5),
        0.0,
        width,
    )
}

/// Arrow head pointing up, `2 * width` wide and `width` tall.
pub fn triangle_up(state: &DrawState, x: f32, y: f32, width: f32) -> Shape {
    let w = width * 2.0;
    outer_rounded_triangle_border(
        state,
        Vec2::new(x, y + width),
        Vec2::new(x + w, y + width),
        Vec2::new(x + w * 0.5, y),
        0.0,
        width,
    )
}

/// Arrow head pointing down, `2 * width` wide and `width` tall.
pub fn triangle_down(state: &DrawState, x: f32, y: f32, width: f32) -> Shape {
    let w = width * 2.0;
    outer_rounded_triangle_border(
        state,
        Vec2::new(x, y),
        Vec2::new(x + w, y),
        Vec2::new(x + w * 0.5, y + width),
        0.0,
        width,
    )
}
