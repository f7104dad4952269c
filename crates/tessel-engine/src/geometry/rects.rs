//! Rectangle family: fills, borders, directional roundings and shadows.

use crate::canvas::DrawState;
use crate::scene::{Shape, ShapeKind};

use super::{MIN_ROUNDING, ShadowClass, classify_shadow};

/// Solid fill whose clamp is pre-intersected with the filled area.
pub fn fill(state: &DrawState, x: f32, y: f32, width: f32, height: f32) -> Shape {
    let origin = state.origin();
    let clamp = state.clamp.clamp(origin.x + x, origin.y + y, width, height);
    state.shape_clamped(ShapeKind::Fill, clamp, x, y, width, height)
}

pub fn rectangle(state: &DrawState, x: f32, y: f32, width: f32, height: f32) -> Shape {
    state.shape(ShapeKind::Rectangle, x, y, width, height)
}

pub fn rectangle_border(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    thickness: f32,
) -> Shape {
    rectangle(state, x, y, width, height).with_thickness(thickness + 1.0)
}

/// Rounded rectangle. Rounding below [`MIN_ROUNDING`] is raised to it.
pub fn rounded_rectangle(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rounding: f32,
) -> Shape {
    let rounding = rounding.max(MIN_ROUNDING);
    state.shape(ShapeKind::RoundedRectangle { rounding }, x, y, width, height)
}

/// Rounds only the left corners: the box grows past the right edge, which the
/// clamp then cuts flush.
pub fn left_rounded_rectangle(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rounding: f32,
) -> Shape {
    let origin = state.origin();
    let clamp = state.clamp.with_max_right(origin.x + x + width);
    let kind = ShapeKind::RoundedRectangle { rounding: rounding.max(MIN_ROUNDING) };
    state.shape_clamped(kind, clamp, x, y, width + rounding + 1.0, height)
}

pub fn right_rounded_rectangle(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rounding: f32,
) -> Shape {
    let origin = state.origin();
    let clamp = state.clamp.with_min_left(origin.x + x);
    let growth = rounding + 1.0;
    let kind = ShapeKind::RoundedRectangle { rounding: rounding.max(MIN_ROUNDING) };
    state.shape_clamped(kind, clamp, x - growth, y, width + growth, height)
}

pub fn top_rounded_rectangle(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rounding: f32,
) -> Shape {
    let origin = state.origin();
    let clamp = state.clamp.with_max_bottom(origin.y + y + height);
    let kind = ShapeKind::RoundedRectangle { rounding: rounding.max(MIN_ROUNDING) };
    state.shape_clamped(kind, clamp, x, y, width, height + rounding + 1.0)
}

pub fn bottom_rounded_rectangle(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rounding: f32,
) -> Shape {
    let origin = state.origin();
    let clamp = state.clamp.with_min_top(origin.y + y);
    let growth = rounding + 1.0;
    let kind = ShapeKind::RoundedRectangle { rounding: rounding.max(MIN_ROUNDING) };
    state.shape_clamped(kind, clamp, x, y - growth, width, height + growth)
}

/// Rectangle softened over `blur_radius` pixels. Nothing for a non-positive blur.
pub fn rectangle_shadow(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    blur_radius: f32,
) -> Option<Shape> {
    if blur_radius <= 0.0 {
        return None;
    }
    Some(rectangle(state, x, y, width, height).with_pixel_width(blur_radius))
}

/// Shadow of a rounded rectangle, grown by the blur radius and centered on it.
pub fn rounded_rectangle_shadow(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rounding: f32,
    blur_radius: f32,
) -> Option<Shape> {
    if blur_radius <= 0.0 {
        return None;
    }

    let offset = -blur_radius * 0.5;
    let (x, y) = (x + offset, y + offset);
    let (width, height) = (width + blur_radius, height + blur_radius);

    match classify_shadow(rounding) {
        ShadowClass::Rectangle => rectangle_shadow(state, x, y, width, height, blur_radius),
        ShadowClass::RoundedRectangle => Some(
            state
                .shape(ShapeKind::RoundedRectangle { rounding }, x, y, width, height)
                .with_pixel_width(blur_radius),
        ),
    }
}

/// Border of a rounded rectangle as four clamped strips, so corner pixels are
/// covered exactly once: left and right strips first, then top and bottom
/// strips narrowed to exclude the corners already drawn.
pub fn rounded_rectangle_border(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rounding: f32,
    thickness: f32,
) -> [Shape; 4] {
    let origin = state.origin();
    let (left, top) = (origin.x + x, origin.y + y);
    let part = rounding.max(thickness) + 1.0;
    let clamp = state.clamp;

    let strip = |clamp| {
        state
            .shape_clamped(ShapeKind::RoundedRectangle { rounding }, clamp, x, y, width, height)
            .with_thickness(thickness)
    };

    let middle = clamp.with_min_left(left + part).with_max_right(left + width - part);
    [
        strip(clamp.with_max_right(left + part)),
        strip(clamp.with_min_left(left + width - part)),
        strip(middle.with_max_bottom(top + part)),
        strip(middle.with_min_top(top + height - part)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{ClampBounds, Rect};
    use crate::scene::ShapeTag;

    fn state(clamp: ClampBounds) -> DrawState {
        DrawState::with_clamp(clamp)
    }

    #[test]
    fn fill_is_limited_to_the_clamp() {
        let s = fill(&state(ClampBounds::new(0.0, 0.0, 5.0, 5.0)), 0.0, 0.0, 10.0, 10.0);
        let visible = s.visible_bounds().expect("partially visible");
        assert!(Rect::new(0.0, 0.0, 5.0, 5.0).contains_rect(visible));
    }

    #[test]
    fn fill_outside_the_clamp_is_culled() {
        let s = fill(&state(ClampBounds::new(0.0, 0.0, 5.0, 5.0)), 10.0, 10.0, 5.0, 5.0);
        assert!(s.visible_bounds().is_none());
    }

    #[test]
    fn offset_is_applied() {
        let mut st = state(ClampBounds::new(0.0, 0.0, 100.0, 100.0));
        st.x = 7;
        st.y = -3;
        let s = rectangle(&st, 1.0, 1.0, 4.0, 4.0);
        assert_eq!((s.x, s.y), (8.0, -2.0));
    }

    #[test]
    fn rounded_rectangle_has_minimum_rounding() {
        let s = rounded_rectangle(&state(ClampBounds::new(0.0, 0.0, 9.0, 9.0)), 0.0, 0.0, 5.0, 5.0, 0.0);
        assert_eq!(s.kind, ShapeKind::RoundedRectangle { rounding: 1.0 });
    }

    #[test]
    fn left_rounded_cuts_the_right_side_flush() {
        let st = state(ClampBounds::new(0.0, 0.0, 100.0, 100.0));
        let s = left_rounded_rectangle(&st, 10.0, 10.0, 20.0, 20.0, 4.0);
        assert_eq!(s.clamp.right, 30.0);
        assert_eq!(s.width, 25.0);
        assert_eq!(s.visible_bounds(), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn right_rounded_grows_leftwards() {
        let st = state(ClampBounds::new(0.0, 0.0, 100.0, 100.0));
        let s = right_rounded_rectangle(&st, 10.0, 10.0, 20.0, 20.0, 4.0);
        assert_eq!(s.x, 5.0);
        assert_eq!(s.clamp.left, 10.0);
        assert_eq!(s.visible_bounds(), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn top_and_bottom_rounded_cut_flush() {
        let st = state(ClampBounds::new(0.0, 0.0, 100.0, 100.0));
        let top = top_rounded_rectangle(&st, 0.0, 10.0, 20.0, 20.0, 3.0);
        assert_eq!(top.visible_bounds(), Some(Rect::new(0.0, 10.0, 20.0, 20.0)));
        let bottom = bottom_rounded_rectangle(&st, 0.0, 10.0, 20.0, 20.0, 3.0);
        assert_eq!(bottom.y, 6.0);
        assert_eq!(bottom.visible_bounds(), Some(Rect::new(0.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn zero_blur_shadow_is_nothing() {
        let st = state(ClampBounds::new(0.0, 0.0, 100.0, 100.0));
        assert!(rectangle_shadow(&st, 0.0, 0.0, 5.0, 5.0, 0.0).is_none());
        assert!(rounded_rectangle_shadow(&st, 0.0, 0.0, 5.0, 5.0, 4.0, -1.0).is_none());
    }

    #[test]
    fn square_rounded_shadow_degrades_to_rectangle_shadow() {
        let mut st = state(ClampBounds::new(0.0, 0.0, 100.0, 100.0));
        st.x = 10;
        st.y = 10;
        let rounded = rounded_rectangle_shadow(&st, 5.0, 5.0, 20.0, 10.0, 0.0, 4.0).unwrap();
        let plain = rectangle_shadow(&st, 3.0, 3.0, 24.0, 14.0, 4.0).unwrap();
        assert_eq!(rounded.tag(), ShapeTag::Rectangle);
        assert_eq!(rounded, plain);
        assert_eq!(rounded.pixel_width, 4.0);
    }

    #[test]
    fn rounded_shadow_keeps_rounding() {
        let st = state(ClampBounds::new(0.0, 0.0, 100.0, 100.0));
        let s = rounded_rectangle_shadow(&st, 10.0, 10.0, 20.0, 20.0, 6.0, 4.0).unwrap();
        assert_eq!(s.kind, ShapeKind::RoundedRectangle { rounding: 6.0 });
        assert_eq!((s.x, s.y, s.width, s.height), (8.0, 8.0, 24.0, 24.0));
    }

    #[test]
    fn border_strips_do_not_overlap() {
        let st = state(ClampBounds::new(0.0, 0.0, 200.0, 200.0));
        let strips = rounded_rectangle_border(&st, 10.0, 10.0, 100.0, 60.0, 8.0, 2.0);
        let visible: Vec<Rect> = strips.iter().filter_map(|s| s.visible_bounds()).collect();
        assert_eq!(visible.len(), 4);
        for (i, a) in visible.iter().enumerate() {
            for b in &visible[i + 1..] {
                assert!(!a.overlaps(*b), "{a:?} overlaps {b:?}");
            }
        }
        assert!(strips.iter().all(|s| s.thickness == Some(2.0)));
    }
}
