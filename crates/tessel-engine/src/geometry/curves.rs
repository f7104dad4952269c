//! Arcs, segments and quadratic curves.

use crate::canvas::DrawState;
use crate::coords::Vec2;
use crate::scene::{ArcGeometry, SegmentGeometry, Shape, ShapeKind};

use super::{CurveClass, bounding_box, classify_quadratic, normalize};

#[allow(clippy::too_many_arguments)]
fn arc_shape(
    state: &DrawState,
    rounded: bool,
    x: f32,
    y: f32,
    width: f32,
    thickness: f32,
    center_radians: f32,
    radians: f32,
) -> Shape {
    let geometry = ArcGeometry { thickness: thickness + 1.0, center_radians, radians };
    let kind = if rounded { ShapeKind::RoundedArc(geometry) } else { ShapeKind::FlatArc(geometry) };
    state.shape(kind, x, y, width, width)
}

/// Arc with round caps, sweeping `radians` centered on `center_radians`.
#[allow(clippy::too_many_arguments)]
pub fn rounded_arc(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    thickness: f32,
    center_radians: f32,
    radians: f32,
    pixel_width: f32,
) -> Shape {
    arc_shape(state, true, x, y, width, thickness, center_radians, radians)
        .with_pixel_width(pixel_width)
}

/// Arc with square caps.
#[allow(clippy::too_many_arguments)]
pub fn flat_arc(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    thickness: f32,
    center_radians: f32,
    radians: f32,
    pixel_width: f32,
) -> Shape {
    arc_shape(state, false, x, y, width, thickness, center_radians, radians)
        .with_pixel_width(pixel_width)
}

#[allow(clippy::too_many_arguments)]
pub fn arc(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    thickness: f32,
    center_radians: f32,
    radians: f32,
    rounded: bool,
    pixel_width: f32,
) -> Shape {
    arc_shape(state, rounded, x, y, width, thickness, center_radians, radians)
        .with_pixel_width(pixel_width)
}

#[allow(clippy::too_many_arguments)]
fn arc_shadow(
    state: &DrawState,
    rounded: bool,
    x: f32,
    y: f32,
    width: f32,
    thickness: f32,
    center_radians: f32,
    radians: f32,
    shadow_width: f32,
) -> Shape {
    let full_width = width + 2.0 * shadow_width;
    arc_shape(
        state,
        rounded,
        x - shadow_width,
        y - shadow_width,
        full_width,
        thickness + 2.0 * shadow_width,
        center_radians,
        radians,
    )
    .with_pixel_width(shadow_width)
}

#[allow(clippy::too_many_arguments)]
pub fn rounded_arc_shadow(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    thickness: f32,
    center_radians: f32,
    radians: f32,
    shadow_width: f32,
) -> Shape {
    arc_shadow(state, true, x, y, width, thickness, center_radians, radians, shadow_width)
}

#[allow(clippy::too_many_arguments)]
pub fn flat_arc_shadow(
    state: &DrawState,
    x: f32,
    y: f32,
    width: f32,
    thickness: f32,
    center_radians: f32,
    radians: f32,
    shadow_width: f32,
) -> Shape {
    arc_shadow(state, false, x, y, width, thickness, center_radians, radians, shadow_width)
}

/// Straight stroke from `a` to `b`; the box is padded by `thickness` on every side.
pub fn segment(
    state: &DrawState,
    a: Vec2,
    b: Vec2,
    thickness: f32,
    rounded: bool,
    pixel_width: f32,
) -> Shape {
    let bbox = bounding_box(&[a, b], thickness);
    let geometry = SegmentGeometry {
        a: normalize(a, bbox),
        b: normalize(b, bbox),
        thickness: thickness + 1.0,
    };
    let kind = if rounded {
        ShapeKind::RoundedSegment(geometry)
    } else {
        ShapeKind::FlatSegment(geometry)
    };
    state
        .shape(kind, bbox.x(), bbox.y(), bbox.width(), bbox.height())
        .with_pixel_width(pixel_width)
}

/// Quadratic Bézier through control point `b`.
///
/// Nearly collinear control points are drawn as a rounded segment from `a` to `c`.
pub fn quadratic(
    state: &DrawState,
    a: Vec2,
    b: Vec2,
    c: Vec2,
    thickness: f32,
    pixel_width: f32,
) -> Shape {
    if classify_quadratic(a, b, c) == CurveClass::Straight {
        return segment(state, a, c, thickness, true, pixel_width);
    }

    let bbox = bounding_box(&[a, b, c], thickness);
    let kind = ShapeKind::QuadraticBezier {
        a: normalize(a, bbox),
        b: normalize(b, bbox),
        c: normalize(c, bbox),
        thickness: thickness + 1.0,
    };
    state
        .shape(kind, bbox.x(), bbox.y(), bbox.width(), bbox.height())
        .with_pixel_width(pixel_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ClampBounds;
    use crate::scene::ShapeTag;

    fn st() -> DrawState {
        DrawState::with_clamp(ClampBounds::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn segment_box_is_padded_by_thickness() {
        let s = segment(&st(), Vec2::new(10.0, 10.0), Vec2::new(30.0, 20.0), 2.0, false, 1.0);
        assert_eq!((s.x, s.y, s.width, s.height), (8.0, 8.0, 24.0, 14.0));
        let ShapeKind::FlatSegment(g) = s.kind else { panic!("expected flat segment") };
        assert!((g.a.x - (2.0 * 2.0 / 24.0 - 1.0)).abs() < 1e-6);
        assert!((g.b.y - (2.0 * 12.0 / 14.0 - 1.0)).abs() < 1e-6);
        assert_eq!(g.thickness, 3.0);
    }

    #[test]
    fn collinear_quadratic_becomes_rounded_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(5.0, 5.0);
        let c = Vec2::new(10.0, 10.0);
        let s = quadratic(&st(), a, b, c, 1.0, 1.0);
        assert_eq!(s.tag(), ShapeTag::RoundedSegment);
        assert_eq!(s, segment(&st(), a, c, 1.0, true, 1.0));
    }

    #[test]
    fn curved_quadratic_stays_bezier() {
        let s = quadratic(
            &st(),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            1.0,
            1.0,
        );
        let ShapeKind::QuadraticBezier { a, c, .. } = s.kind else { panic!("expected bezier") };
        assert!(a.x > -1.0 && a.x < 0.0);
        assert!(c.y < 1.0 && c.y > 0.0);
    }

    #[test]
    fn arc_shadow_expands_and_softens() {
        let s = rounded_arc_shadow(&st(), 10.0, 10.0, 20.0, 2.0, 0.0, 1.0, 3.0);
        assert_eq!((s.x, s.y, s.width, s.height), (7.0, 7.0, 26.0, 26.0));
        assert_eq!(s.pixel_width, 3.0);
        let ShapeKind::RoundedArc(g) = s.kind else { panic!("expected rounded arc") };
        assert_eq!(g.thickness, 9.0);
    }

    #[test]
    fn arc_picks_cap_style() {
        assert_eq!(arc(&st(), 0.0, 0.0, 10.0, 1.0, 0.0, 1.0, true, 1.0).tag(), ShapeTag::RoundedArc);
        assert_eq!(arc(&st(), 0.0, 0.0, 10.0, 1.0, 0.0, 1.0, false, 1.0).tag(), ShapeTag::FlatArc);
    }
}
