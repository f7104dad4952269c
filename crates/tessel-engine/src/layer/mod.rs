//! Layers: render targets that regions are drawn into.
//!
//! Layer 0 is the composite layer presented to a window (or kept headless).
//! Higher layers are intermediate textures: every region packed into one gets
//! its own rectangle there, and the region's parent samples that rectangle back
//! with a composite shape.

use raw_window_handle::RawWindowHandle;

use crate::atlas::{AtlasRect, ShelfPacker};
use crate::coords::Rect;
use crate::region::RegionId;

/// Where a layer's pixels end up.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum LayerTarget {
    /// Composite layer with nothing to present to yet.
    #[default]
    Unbound,
    /// Presented to a native window through a swap chain.
    Window {
        handle: RawWindowHandle,
        width: u32,
        height: u32,
    },
    /// Rendered off screen at a fixed size.
    Headless { width: u32, height: u32 },
    /// Intermediate texture sized by its packer.
    Offscreen,
}

impl LayerTarget {
    #[inline]
    pub fn is_bound(&self) -> bool {
        !matches!(self, LayerTarget::Unbound)
    }
}

#[derive(Debug)]
pub struct Layer {
    index: usize,
    target: LayerTarget,
    width: u32,
    height: u32,
    packer: ShelfPacker<RegionId>,
    invalid_rects: Vec<Rect>,
}

impl Layer {
    /// Layer 0: covers the window and starts unbound.
    pub fn composite() -> Self {
        Self {
            index: 0,
            target: LayerTarget::Unbound,
            width: 0,
            height: 0,
            packer: ShelfPacker::new(1, 1, 0),
            invalid_rects: Vec::new(),
        }
    }

    /// Intermediate layer at `index` (> 0); grows as regions are packed into it.
    pub fn intermediate(index: usize, initial_size: u32, padding: u32) -> Self {
        assert!(index > 0, "layer 0 is the composite layer");
        let packer = ShelfPacker::new(initial_size, initial_size, padding);
        Self {
            index,
            target: LayerTarget::Offscreen,
            width: packer.width(),
            height: packer.height(),
            packer,
            invalid_rects: Vec::new(),
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        self.index == 0
    }

    #[inline]
    pub fn target(&self) -> LayerTarget {
        self.target
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    pub(crate) fn pair_to_window(&mut self, handle: RawWindowHandle, width: u32, height: u32) {
        debug_assert!(self.is_composite());
        self.target = LayerTarget::Window { handle, width, height };
        self.set_dimensions(width, height);
    }

    pub(crate) fn set_headless(&mut self, width: u32, height: u32) {
        debug_assert!(self.is_composite());
        self.target = LayerTarget::Headless { width, height };
        self.set_dimensions(width, height);
    }

    pub(crate) fn unbind(&mut self) {
        self.target = LayerTarget::Unbound;
    }

    /// Resizes the composite target and invalidates all of it.
    pub(crate) fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        match &mut self.target {
            LayerTarget::Window { width: w, height: h, .. }
            | LayerTarget::Headless { width: w, height: h } => {
                *w = width;
                *h = height;
            }
            LayerTarget::Unbound | LayerTarget::Offscreen => {}
        }
        self.invalidate_all();
    }

    // ── packing ───────────────────────────────────────────────────────────

    #[inline]
    pub fn packed_len(&self) -> usize {
        self.packer.len()
    }

    /// Packed regions in the order they were added.
    pub fn packed_regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.packer.keys().copied()
    }

    #[inline]
    pub fn contains_region(&self, id: RegionId) -> bool {
        self.packer.get(&id).is_some()
    }

    /// Where `id` lives inside this layer's texture.
    pub fn packed_rect(&self, id: RegionId) -> Option<Rect> {
        self.packer.get(&id).map(atlas_rect_to_rect)
    }

    /// Reserves space for a region and invalidates it.
    ///
    /// When the packer has to grow, every packed region moves and the whole
    /// layer is invalidated.
    pub(crate) fn add_packed_region(&mut self, id: RegionId, width: u32, height: u32) -> Rect {
        let generation = self.packer.generation();
        let rect = atlas_rect_to_rect(self.packer.insert(id, width.max(1), height.max(1)));
        self.width = self.packer.width();
        self.height = self.packer.height();

        if self.packer.generation() != generation {
            log::debug!(
                "layer {} repacked at {}x{} with {} regions",
                self.index,
                self.width,
                self.height,
                self.packer.len()
            );
            self.invalidate_all();
        } else {
            self.invalidate_rect(rect);
        }
        rect
    }

    /// Releases a region's space, returning where it was last drawn.
    pub(crate) fn remove_packed_region(&mut self, id: RegionId) -> Option<Rect> {
        self.packer.remove(&id).map(atlas_rect_to_rect)
    }

    // ── invalidation ──────────────────────────────────────────────────────

    #[inline]
    pub fn invalid_rects(&self) -> &[Rect] {
        &self.invalid_rects
    }

    #[inline]
    pub fn has_invalid_rects(&self) -> bool {
        !self.invalid_rects.is_empty()
    }

    /// Marks `rect` (layer space) for redraw.
    ///
    /// Empty rects are ignored and rects covered by an existing entry are
    /// dropped; entries covered by the new rect are replaced by it.
    pub fn invalidate_rect(&mut self, rect: Rect) {
        let rect = rect.normalized();
        if rect.is_empty() {
            return;
        }
        if self.invalid_rects.iter().any(|r| r.contains_rect(rect)) {
            return;
        }
        self.invalid_rects.retain(|r| !rect.contains_rect(*r));
        self.invalid_rects.push(rect);
    }

    pub fn invalidate_all(&mut self) {
        self.invalid_rects.clear();
        let bounds = self.bounds();
        if !bounds.is_empty() {
            self.invalid_rects.push(bounds);
        }
    }

    pub(crate) fn clear_invalid_rects(&mut self) {
        self.invalid_rects.clear();
    }
}

fn atlas_rect_to_rect(r: AtlasRect) -> Rect {
    Rect::new(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
}
