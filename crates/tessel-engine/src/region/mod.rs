//! Regions: rectangular drawing surfaces in a tree.
//!
//! A region owns the shape queue and the per-frame resource tables (brushes,
//! texts, lines) its shapes refer to. Regions live in a [`RegionArena`] owned
//! by the canvas; parents and children refer to each other through
//! [`RegionId`] handles, never through pointers.

mod arena;

pub use arena::{RegionArena, RegionId};

use crate::atlas::GradientAtlas;
use crate::coords::{Rect, Vec2};
use crate::paint::{Brush, PackedBrush};
use crate::scene::{Line, Shape, ShapeBatcher};
use crate::text::Text;

/// Index of a packed brush inside the region that resolved it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BrushId(pub u32);

/// Index of a text block inside the region that stored it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextId(pub u32);

/// Index of a line path inside the region that stored it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LineId(pub u32);

#[derive(Debug)]
pub struct Region {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    visible: bool,
    pub(crate) parent: Option<RegionId>,
    pub(crate) sub_regions: Vec<RegionId>,
    /// Intermediate layer this region is packed into, if any.
    pub(crate) packed_layer: Option<usize>,
    batcher: ShapeBatcher,
    brushes: Vec<PackedBrush>,
    texts: Vec<Text>,
    lines: Vec<Line>,
    /// Invalidations recorded before the region had a place in its layer.
    pub(crate) deferred_invalidations: Vec<(usize, Rect)>,
}

impl Region {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            visible: true,
            parent: None,
            sub_regions: Vec::new(),
            packed_layer: None,
            batcher: ShapeBatcher::new(),
            brushes: Vec::new(),
            texts: Vec::new(),
            lines: Vec::new(),
            deferred_invalidations: Vec::new(),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Bounds in the parent's coordinate space.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x as f32, self.y as f32, self.width as f32, self.height as f32)
    }

    /// Bounds in the region's own coordinate space.
    #[inline]
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    pub fn set_bounds(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    #[inline]
    pub fn sub_regions(&self) -> &[RegionId] {
        &self.sub_regions
    }

    #[inline]
    pub fn packed_layer(&self) -> Option<usize> {
        self.packed_layer
    }

    #[inline]
    pub fn batcher(&self) -> &ShapeBatcher {
        &self.batcher
    }

    /// Queues a shape; returns `false` when it was culled.
    #[inline]
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        self.batcher.add_shape(shape)
    }

    #[inline]
    pub fn shape_count(&self) -> usize {
        self.batcher.len()
    }

    /// Resolves `brush` into the gradient atlas and returns its index in this region.
    ///
    /// Identical packed brushes share one index so their shapes can batch
    /// together. The region holds one atlas reference per index until
    /// [`clear`](Self::clear).
    pub fn add_brush(&mut self, atlas: &mut GradientAtlas, brush: &Brush) -> BrushId {
        let (start, end, spread) = brush.axis();
        let packed = PackedBrush { gradient: atlas.add_brush(brush), start, end, spread };

        if let Some(i) = self.brushes.iter().rposition(|b| *b == packed) {
            atlas.release(packed.gradient.key);
            return BrushId(i as u32);
        }
        self.brushes.push(packed);
        BrushId(self.brushes.len() as u32 - 1)
    }

    #[inline]
    pub fn brush(&self, id: BrushId) -> Option<&PackedBrush> {
        self.brushes.get(id.0 as usize)
    }

    pub fn add_text(&mut self, text: Text) -> TextId {
        self.texts.push(text);
        TextId(self.texts.len() as u32 - 1)
    }

    #[inline]
    pub fn text(&self, id: TextId) -> Option<&Text> {
        self.texts.get(id.0 as usize)
    }

    #[inline]
    pub fn texts(&self) -> &[Text] {
        &self.texts
    }

    pub fn add_line(&mut self, line: Line) -> LineId {
        self.lines.push(line);
        LineId(self.lines.len() as u32 - 1)
    }

    #[inline]
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.0 as usize)
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Drops every queued shape and per-frame resource, releasing this
    /// region's gradient rows.
    ///
    /// Handles issued before the clear are invalid afterwards.
    pub fn clear(&mut self, atlas: &mut GradientAtlas) {
        self.batcher.clear();
        for brush in self.brushes.drain(..) {
            atlas.release(brush.gradient.key);
        }
        self.texts.clear();
        self.lines.clear();
    }
}
