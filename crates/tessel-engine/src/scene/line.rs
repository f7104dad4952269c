use crate::coords::Vec2;

/// Polyline drawn by `line`/`line_fill` shapes, in the shape's local box
/// (`0..width`, `0..height`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub points: Vec<Vec2>,
}

impl Line {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
