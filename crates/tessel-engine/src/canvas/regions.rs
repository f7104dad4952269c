//! Region tree, layer assignment and invalidation.

use crate::coords::{ClampBounds, Rect, Vec2};
use crate::layer::Layer;
use crate::paint::BlendMode;
use crate::region::{Region, RegionId};

use super::{Canvas, expect_region};

impl Canvas {
    /// Root of the region tree; covers the whole window.
    #[inline]
    pub fn window_region(&self) -> RegionId {
        self.window_region
    }

    /// Region drawn into when no other region has been begun.
    #[inline]
    pub fn default_region(&self) -> RegionId {
        self.default_region
    }

    /// Creates a detached region. Attach it with [`add_region`](Self::add_region)
    /// or [`add_sub_region`](Self::add_sub_region) to have it drawn.
    pub fn create_region(&mut self, x: i32, y: i32, width: i32, height: i32) -> RegionId {
        let mut region = Region::new(width, height);
        region.set_bounds(x, y, width, height);
        let id = self.regions.insert(region);
        log::debug!("region {:?} created ({x}, {y}, {width}x{height})", id);
        id
    }

    /// Attaches `child` under the default region.
    pub fn add_region(&mut self, child: RegionId) {
        self.add_sub_region(self.default_region, child);
    }

    /// Attaches `child` under `parent`, detaching it from any previous parent.
    /// Later children draw over earlier ones.
    ///
    /// # Panics
    /// When `child` is `parent` or one of its ancestors.
    pub fn add_sub_region(&mut self, parent: RegionId, child: RegionId) {
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            assert_ne!(id, child, "a region cannot contain itself or its ancestors");
            ancestor = self.region(id).parent();
        }
        self.detach_region(child);
        self.region_mut(parent).sub_regions.push(child);
        self.region_mut(child).parent = Some(parent);
        self.invalidate_region(child);
    }

    /// Destroys a region. Its children stay alive but become detached.
    ///
    /// # Panics
    /// For the window and default regions, or a stale handle.
    pub fn remove_region(&mut self, id: RegionId) {
        assert!(
            id != self.window_region && id != self.default_region,
            "the window and default regions cannot be removed"
        );
        self.detach_region(id);
        if let Some(layer) = self.region(id).packed_layer() {
            self.remove_from_packed_layer(id, layer);
        }

        let children = std::mem::take(&mut self.region_mut(id).sub_regions);
        for child in children {
            if let Some(region) = self.regions.get_mut(child) {
                region.parent = None;
            }
        }
        if let Some(mut region) = self.regions.remove(id) {
            region.clear(&mut self.gradient_atlas);
        }
        log::debug!("region {:?} removed", id);
    }

    fn detach_region(&mut self, id: RegionId) {
        let Some(parent) = self.region(id).parent() else { return };
        self.invalidate_region(id);
        self.region_mut(parent).sub_regions.retain(|c| *c != id);
        self.region_mut(id).parent = None;
    }

    /// Moves and resizes a region, invalidating both its old and new area.
    pub fn set_region_bounds(&mut self, id: RegionId, x: i32, y: i32, width: i32, height: i32) {
        self.invalidate_region(id);
        let region = self.region_mut(id);
        let resized = region.width() != width || region.height() != height;
        region.set_bounds(x, y, width, height);

        if let Some(layer) = self.region(id).packed_layer().filter(|_| resized) {
            self.remove_from_packed_layer(id, layer);
            self.add_to_packed_layer(id, layer);
        }
        self.invalidate_region(id);
    }

    pub fn set_region_visible(&mut self, id: RegionId, visible: bool) {
        if self.region(id).is_visible() != visible {
            self.invalidate_region(id);
            self.region_mut(id).set_visible(visible);
        }
    }

    /// Draws `id` through intermediate layer `layer`, or directly into its
    /// parent when `layer` is 0.
    pub fn set_region_layer(&mut self, id: RegionId, layer: usize) {
        let current = self.region(id).packed_layer().unwrap_or(0);
        if current != layer {
            self.change_packed_layer(id, current, layer);
        }
    }

    // ── drawing scope ─────────────────────────────────────────────────────

    /// Starts redrawing `id`: clears its queued shapes, pushes the drawing
    /// state and resets it to the region's own space.
    pub fn begin_region(&mut self, id: RegionId) {
        let region = expect_region(&mut self.regions, id);
        region.clear(&mut self.gradient_atlas);
        let (width, height) = (region.width().max(0) as f32, region.height().max(0) as f32);

        self.save_state();
        self.state.x = 0;
        self.state.y = 0;
        self.state.brush = None;
        self.state.blend_mode = BlendMode::Alpha;
        self.state.clamp = ClampBounds::from_rect(0.0, 0.0, width, height);
        self.state.region = Some(id);

        self.invalidate_region(id);
    }

    /// Ends the scope opened by [`begin_region`](Self::begin_region).
    pub fn end_region(&mut self) {
        self.restore_state();
    }

    // ── layers ────────────────────────────────────────────────────────────

    /// Allocates layers up to and including `index`.
    pub fn ensure_layer_exists(&mut self, index: usize) {
        while self.layers.len() <= index {
            let i = self.layers.len();
            self.layers.push(Layer::intermediate(i, self.config.layer_size, self.config.layer_padding));
            log::debug!("layer {i} created");
        }
    }

    /// Layer `index`, allocating it if needed.
    pub fn layer(&mut self, index: usize) -> &mut Layer {
        self.ensure_layer_exists(index);
        &mut self.layers[index]
    }

    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Packs `id` into intermediate layer `layer_index`, moving it out of any
    /// other layer. Index 0 unpacks it.
    pub fn add_to_packed_layer(&mut self, id: RegionId, layer_index: usize) {
        let current = self.region(id).packed_layer();
        if current == Some(layer_index) {
            return;
        }
        let deferred = std::mem::take(&mut self.region_mut(id).deferred_invalidations);
        if let Some(layer) = current {
            self.remove_from_packed_layer(id, layer);
        }
        if layer_index == 0 {
            return;
        }

        self.ensure_layer_exists(layer_index);
        let parent_layer = self.region(id).parent().map(|p| self.placement(p).0);
        if let Some(parent_layer) = parent_layer.filter(|l| *l >= layer_index) {
            log::warn!(
                "region {:?} packed into layer {layer_index}, not above its parent's layer {parent_layer}",
                id
            );
        }

        let region = self.region(id);
        let (width, height) = (region.width().max(0) as u32, region.height().max(0) as u32);
        self.layers[layer_index].add_packed_region(id, width, height);

        self.region_mut(id).packed_layer = Some(layer_index);
        for (_, rect) in deferred.into_iter().filter(|(layer, _)| *layer == layer_index) {
            self.invalidate_rect_in_region(rect, id, layer_index);
        }
        self.invalidate_region(id);
        log::debug!("region {:?} packed into layer {layer_index}", id);
    }

    /// Releases `id`'s space in `layer_index`. The space it last occupied
    /// stays invalidated so the layer redraws it.
    pub fn remove_from_packed_layer(&mut self, id: RegionId, layer_index: usize) {
        let Some(layer) = self.layers.get_mut(layer_index) else { return };
        let Some(last) = layer.remove_packed_region(id) else { return };
        layer.invalidate_rect(last);

        let region = self.region_mut(id);
        if region.packed_layer == Some(layer_index) {
            region.packed_layer = None;
        }
        region.deferred_invalidations.clear();
        self.invalidate_region(id);
        log::debug!("region {:?} removed from layer {layer_index}", id);
    }

    pub fn change_packed_layer(&mut self, id: RegionId, from: usize, to: usize) {
        if from == to {
            return;
        }
        if from > 0 {
            self.remove_from_packed_layer(id, from);
        }
        if to > 0 {
            self.add_to_packed_layer(id, to);
        }
    }

    // ── invalidation ──────────────────────────────────────────────────────

    /// Marks `rect` (in `id`'s local space) dirty in `layer`.
    ///
    /// For layer 0 the rect is placed at the region's window position. For an
    /// intermediate layer the region has not been placed in yet, the rect is
    /// merged into one pending rect per layer and applied once the region is
    /// packed there. Packing or unpacking drops pending rects for other layers.
    pub fn invalidate_rect_in_region(&mut self, rect: Rect, id: RegionId, layer: usize) {
        let (placed, origin) = self.placement(id);
        if placed == layer {
            self.layer(layer).invalidate_rect(rect.translated(origin));
        } else if layer == 0 {
            let origin = self.absolute_bounds(id).origin;
            self.layers[0].invalidate_rect(rect.translated(origin));
        } else {
            log::trace!("invalidation of {:?} in layer {layer} deferred until packed", id);
            let deferred = &mut self.region_mut(id).deferred_invalidations;
            match deferred.iter_mut().find(|(l, _)| *l == layer) {
                Some((_, pending)) => *pending = pending.union(rect),
                None => deferred.push((layer, rect)),
            }
        }
    }

    /// Marks all of `id` dirty where it is drawn and, when it is packed,
    /// where its layer is composited.
    pub fn invalidate_region(&mut self, id: RegionId) {
        let region = self.region(id);
        let bounds = region.local_bounds();
        let packed = region.packed_layer().is_some();

        let (layer, origin) = self.placement(id);
        self.layers[layer].invalidate_rect(bounds.translated(origin));
        if packed {
            self.invalidate_destination(id);
        }
    }

    /// Invalidates the area a packed region is composited onto.
    pub(super) fn invalidate_destination(&mut self, id: RegionId) {
        let region = self.region(id);
        let Some(parent) = region.parent() else { return };
        let bounds = region.bounds();
        let (layer, origin) = self.placement(parent);
        self.layers[layer].invalidate_rect(bounds.translated(origin));
    }

    /// Layer `id` is drawn into and the position of its origin there.
    pub(super) fn placement(&self, id: RegionId) -> (usize, Vec2) {
        let region = self.region(id);
        let packed = region
            .packed_layer()
            .and_then(|layer| self.layers.get(layer)?.packed_rect(id).map(|rect| (layer, rect.origin)));
        if let Some(placement) = packed {
            return placement;
        }
        match region.parent() {
            Some(parent) => {
                let (layer, origin) = self.placement(parent);
                (layer, origin + region.position())
            }
            None => (0, region.position()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.set_windowless(200, 100);
        canvas.layer(0).clear_invalid_rects();
        canvas
    }

    #[test]
    fn begin_region_resets_drawing_state() {
        let mut c = canvas();
        let id = c.create_region(10, 10, 40, 30);
        c.add_region(id);
        c.set_position(5, 5);
        c.set_blend_mode(BlendMode::Add);
        c.set_color_argb(0xffff0000);

        c.begin_region(id);
        let state = *c.state();
        assert_eq!((state.x, state.y), (0, 0));
        assert_eq!(state.brush, None);
        assert_eq!(state.blend_mode, BlendMode::Alpha);
        assert_eq!(state.clamp, ClampBounds::new(0.0, 0.0, 40.0, 30.0));
        assert_eq!(state.region, Some(id));

        c.end_region();
        assert_eq!(c.x(), 5);
        assert_eq!(c.state().blend_mode, BlendMode::Add);
        assert_eq!(c.state().region, Some(c.default_region()));
    }

    #[test]
    fn begin_region_clears_previous_frame() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 50, 50);
        c.add_region(id);
        c.begin_region(id);
        c.rectangle(0.0, 0.0, 10.0, 10.0);
        c.circle(5.0, 5.0, 10.0);
        c.end_region();
        assert_eq!(c.region(id).shape_count(), 2);

        c.begin_region(id);
        assert_eq!(c.region(id).shape_count(), 0);
        c.end_region();
    }

    #[test]
    fn placement_follows_parents() {
        let mut c = canvas();
        let outer = c.create_region(10, 20, 100, 50);
        let inner = c.create_region(5, 5, 10, 10);
        c.add_region(outer);
        c.add_sub_region(outer, inner);
        assert_eq!(c.placement(inner), (0, Vec2::new(15.0, 25.0)));
    }

    #[test]
    fn packing_moves_placement_to_layer() {
        let mut c = canvas();
        let id = c.create_region(30, 30, 20, 10);
        c.add_region(id);
        c.add_to_packed_layer(id, 1);

        assert_eq!(c.layer_count(), 2);
        let rect = c.layer(1).packed_rect(id).unwrap();
        assert_eq!(c.placement(id), (1, rect.origin));
        assert_eq!(c.region(id).packed_layer(), Some(1));
        assert!(c.layer(1).invalid_rects().contains(&rect));
        // composited destination in the window
        assert!(c.layer(0).invalid_rects().contains(&Rect::new(30.0, 30.0, 20.0, 10.0)));
    }

    #[test]
    fn invalidation_before_packing_is_deferred() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 40, 40);
        c.add_region(id);
        c.ensure_layer_exists(1);
        c.invalidate_rect_in_region(Rect::new(1.0, 2.0, 3.0, 4.0), id, 1);
        assert!(!c.layer(1).has_invalid_rects());

        c.add_to_packed_layer(id, 1);
        c.layer(1).clear_invalid_rects();
        c.invalidate_rect_in_region(Rect::new(1.0, 2.0, 3.0, 4.0), id, 1);
        let origin = c.layer(1).packed_rect(id).unwrap().origin;
        assert_eq!(c.layer(1).invalid_rects(), &[Rect::new(1.0, 2.0, 3.0, 4.0).translated(origin)]);
    }

    #[test]
    fn deferred_invalidation_applies_on_pack() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 40, 40);
        c.add_region(id);
        c.ensure_layer_exists(2);
        c.invalidate_rect_in_region(Rect::new(1.0, 1.0, 2.0, 2.0), id, 2);
        c.add_to_packed_layer(id, 2);
        assert!(c.region(id).deferred_invalidations.is_empty());
        assert!(c.layer(2).has_invalid_rects());
    }

    #[test]
    fn deferred_invalidations_merge_per_layer() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 40, 40);
        c.add_region(id);
        c.add_to_packed_layer(id, 2);
        for i in 0..1000 {
            let x = (i % 30) as f32;
            c.invalidate_rect_in_region(Rect::new(x, 0.0, 4.0, 4.0), id, 1);
        }
        assert_eq!(c.region(id).deferred_invalidations, vec![(1, Rect::new(0.0, 0.0, 33.0, 4.0))]);

        c.remove_from_packed_layer(id, 2);
        assert!(c.region(id).deferred_invalidations.is_empty());
    }

    #[test]
    fn packing_drops_invalidations_for_other_layers() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 40, 40);
        c.add_region(id);
        c.ensure_layer_exists(3);
        c.invalidate_rect_in_region(Rect::new(1.0, 1.0, 2.0, 2.0), id, 3);
        c.add_to_packed_layer(id, 2);
        assert!(c.region(id).deferred_invalidations.is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot contain itself or its ancestors")]
    fn sub_region_cycles_are_rejected() {
        let mut c = canvas();
        let a = c.create_region(0, 0, 40, 40);
        let b = c.create_region(0, 0, 20, 20);
        c.add_region(a);
        c.add_sub_region(a, b);
        c.add_sub_region(b, a);
    }

    #[test]
    fn repeated_resizing_keeps_layer_size() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 100, 100);
        c.add_region(id);
        c.add_to_packed_layer(id, 1);
        let size = (c.layer(1).width(), c.layer(1).height());

        for i in 0..200 {
            let side = 100 + i % 2;
            c.set_region_bounds(id, 0, 0, side, side);
        }
        assert_eq!((c.layer(1).width(), c.layer(1).height()), size);
        assert_eq!(c.layer(1).packed_len(), 1);
    }

    #[test]
    fn changing_layer_invalidates_old_layer() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 16, 16);
        c.add_region(id);
        c.add_to_packed_layer(id, 1);
        let old = c.layer(1).packed_rect(id).unwrap();
        c.layer(1).clear_invalid_rects();

        c.change_packed_layer(id, 1, 2);
        assert!(!c.layer(1).contains_region(id));
        assert!(c.layer(1).invalid_rects().contains(&old));
        assert!(c.layer(2).contains_region(id));
        assert_eq!(c.region(id).packed_layer(), Some(2));
    }

    #[test]
    fn region_is_packed_in_one_layer_at_a_time() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 8, 8);
        c.add_region(id);
        c.add_to_packed_layer(id, 1);
        c.add_to_packed_layer(id, 3);
        assert!(!c.layer(1).contains_region(id));
        assert!(c.layer(3).contains_region(id));

        c.set_region_layer(id, 0);
        assert!(!c.layer(3).contains_region(id));
        assert_eq!(c.placement(id).0, 0);
    }

    #[test]
    fn ensure_layer_exists_is_dense() {
        let mut c = canvas();
        c.ensure_layer_exists(3);
        assert_eq!(c.layer_count(), 4);
        for i in 0..4 {
            assert_eq!(c.layer(i).index(), i);
        }
    }

    #[test]
    fn removed_region_detaches_children() {
        let mut c = canvas();
        let parent = c.create_region(0, 0, 50, 50);
        let child = c.create_region(0, 0, 5, 5);
        c.add_region(parent);
        c.add_sub_region(parent, child);
        c.add_to_packed_layer(parent, 1);

        c.remove_region(parent);
        assert_eq!(c.region(child).parent(), None);
        assert_eq!(c.layer(1).packed_len(), 0);
        assert!(!c.region(c.default_region()).sub_regions().contains(&parent));
    }

    #[test]
    #[should_panic(expected = "stale region handle")]
    fn drawing_into_removed_region_panics() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 50, 50);
        c.add_region(id);
        c.begin_region(id);
        c.remove_region(id);
        c.rectangle(0.0, 0.0, 5.0, 5.0);
    }

    #[test]
    fn resizing_a_packed_region_repacks_it() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 10, 10);
        c.add_region(id);
        c.add_to_packed_layer(id, 1);
        c.set_region_bounds(id, 0, 0, 30, 20);
        let rect = c.layer(1).packed_rect(id).unwrap();
        assert_eq!((rect.width(), rect.height()), (30.0, 20.0));
    }
}
