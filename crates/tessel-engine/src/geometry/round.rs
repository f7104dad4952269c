//! Circles, squircles and diamonds.

use crate::canvas::DrawState;
use crate::scene::{Shape, ShapeKind};

use super::MIN_ROUNDING;

pub fn circle(state: &DrawState, x: f32, y: f32, width: f32) -> Shape {
    state.shape(ShapeKind::Circle, x, y, width, width)
}

/// Circle whose edge fades over `fade` pixels.
pub fn fade_circle(state: &DrawState, x: f32, y: f32, width: f32, fade: f32) -> Shape {
    circle(state, x, y, width).with_pixel_width(fade)
}

pub fn ring(state: &DrawState, x: f32, y: f32, width: f32, thickness: f32) -> Shape {
    circle(state, x, y, width).with_thickness(thickness)
}

pub fn squircle(state: &DrawState, x: f32, y: f32, width: f32, power: f32) -> Shape {
    super_ellipse(state, x, y, width, width, power)
}

pub fn squircle_border(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    power: f32,
    thickness: f32,
) -> Shape {
    squircle(state, x, y, width, power).with_thickness(thickness)
}

pub fn super_ellipse(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    power: f32,
) -> Shape {
    state.shape(ShapeKind::Squircle { power }, x, y, width, height)
}

/// Square rotated 45°, inscribed in a `width` box.
pub fn diamond(state: &DrawState, x: f32, y: f32, width: f32, rounding: f32) -> Shape {
    let rounding = rounding.max(MIN_ROUNDING);
    state.shape(ShapeKind::Diamond { rounding }, x, y, width, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ClampBounds;

    fn st() -> DrawState {
        DrawState::with_clamp(ClampBounds::new(0.0, 0.0, 50.0, 50.0))
    }

    #[test]
    fn circle_is_square() {
        let s = circle(&st(), 1.0, 2.0, 8.0);
        assert_eq!((s.width, s.height), (8.0, 8.0));
        assert_eq!(s.kind, ShapeKind::Circle);
    }

    #[test]
    fn ring_and_fade_set_their_fields() {
        assert_eq!(ring(&st(), 0.0, 0.0, 8.0, 2.0).thickness, Some(2.0));
        assert_eq!(fade_circle(&st(), 0.0, 0.0, 8.0, 3.0).pixel_width, 3.0);
    }

    #[test]
    fn super_ellipse_carries_power() {
        let s = super_ellipse(&st(), 0.0, 0.0, 10.0, 4.0, 3.0);
        assert_eq!(s.kind, ShapeKind::Squircle { power: 3.0 });
        assert_eq!(s.height, 4.0);
    }

    #[test]
    fn diamond_rounding_is_at_least_one() {
        let s = diamond(&st(), 0.0, 0.0, 10.0, 0.25);
        assert_eq!(s.kind, ShapeKind::Diamond { rounding: 1.0 });
    }
}
