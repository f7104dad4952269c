use crate::coords::Rect;
use crate::paint::BlendMode;
use crate::region::BrushId;

use super::{Shape, ShapeTag};

/// Shapes that may share one backend draw call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BatchKey {
    pub blend_mode: BlendMode,
    pub brush: Option<BrushId>,
    pub tag: ShapeTag,
}

impl BatchKey {
    #[inline]
    pub fn of(shape: &Shape) -> Self {
        Self { blend_mode: shape.blend_mode, brush: shape.brush, tag: shape.tag() }
    }
}

/// A run of same-key shapes, in enqueue order.
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    key: BatchKey,
    shapes: Vec<Shape>,
    /// Union of the visible bounds of every shape in the batch.
    bounds: Rect,
}

impl ShapeBatch {
    #[inline]
    pub fn key(&self) -> BatchKey {
        self.key
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Per-region queue of shape descriptors for the current frame.
///
/// A new shape joins the most recent batch with the same [`BatchKey`] unless a
/// batch queued after that one overlaps it; in that case it opens a new batch
/// so later shapes still paint over earlier ones.
///
/// Performance characteristics:
/// - `add_shape()` is O(batches) in the worst case, O(1) for runs of one kind
/// - `clear()` keeps allocated capacity for reuse
#[derive(Debug, Default)]
pub struct ShapeBatcher {
    batches: Vec<ShapeBatch>,
    len: usize,
}

impl ShapeBatcher {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.batches.clear();
        self.len = 0;
    }

    /// Number of queued shapes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn batches(&self) -> &[ShapeBatch] {
        &self.batches
    }

    /// Iterates shapes in paint order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.batches.iter().flat_map(|b| b.shapes.iter())
    }

    /// Queues `shape`. Returns `false` (and queues nothing) when it is fully clamped.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        let Some(bounds) = shape.visible_bounds() else {
            return false;
        };
        let key = BatchKey::of(&shape);

        let mut target = None;
        for (i, batch) in self.batches.iter().enumerate().rev() {
            if batch.key == key {
                target = Some(i);
                break;
            }
            if batch.bounds.overlaps(bounds) {
                break;
            }
        }

        match target {
            Some(i) => {
                let batch = &mut self.batches[i];
                batch.bounds = batch.bounds.union(bounds);
                batch.shapes.push(shape);
            }
            None => self.batches.push(ShapeBatch { key, shapes: vec![shape], bounds }),
        }
        self.len += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ClampBounds;
    use crate::scene::ShapeKind;

    fn at(kind: ShapeKind, x: f32) -> Shape {
        Shape::new(
            kind,
            ClampBounds::new(0.0, 0.0, 100.0, 100.0),
            None,
            BlendMode::Alpha,
            x,
            0.0,
            10.0,
            10.0,
        )
    }

    #[test]
    fn same_kind_shares_a_batch() {
        let mut b = ShapeBatcher::new();
        b.add_shape(at(ShapeKind::Rectangle, 0.0));
        b.add_shape(at(ShapeKind::Rectangle, 20.0));
        assert_eq!(b.batches().len(), 1);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn disjoint_shape_merges_past_other_kinds() {
        let mut b = ShapeBatcher::new();
        b.add_shape(at(ShapeKind::Rectangle, 0.0));
        b.add_shape(at(ShapeKind::Circle, 20.0));
        b.add_shape(at(ShapeKind::Rectangle, 40.0));
        assert_eq!(b.batches().len(), 2);
        assert_eq!(b.batches()[0].shapes().len(), 2);
    }

    #[test]
    fn overlapping_shape_keeps_paint_order() {
        let mut b = ShapeBatcher::new();
        b.add_shape(at(ShapeKind::Rectangle, 0.0));
        b.add_shape(at(ShapeKind::Circle, 5.0));
        b.add_shape(at(ShapeKind::Rectangle, 8.0));
        assert_eq!(b.batches().len(), 3);
        let order: Vec<f32> = b.shapes().map(|s| s.x).collect();
        assert_eq!(order, vec![0.0, 5.0, 8.0]);
    }

    #[test]
    fn blend_mode_splits_batches() {
        let mut b = ShapeBatcher::new();
        b.add_shape(at(ShapeKind::Rectangle, 0.0));
        let mut additive = at(ShapeKind::Rectangle, 50.0);
        additive.blend_mode = BlendMode::Add;
        b.add_shape(additive);
        assert_eq!(b.batches().len(), 2);
    }

    #[test]
    fn clamped_shape_is_dropped() {
        let mut b = ShapeBatcher::new();
        assert!(!b.add_shape(at(ShapeKind::Rectangle, 200.0)));
        assert!(b.is_empty());
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut b = ShapeBatcher::new();
        for i in 0..5 {
            b.add_shape(at(ShapeKind::Circle, i as f32 * 3.0));
        }
        b.clear();
        assert_eq!(b.len(), 0);
        assert!(b.batches().is_empty());
    }
}
