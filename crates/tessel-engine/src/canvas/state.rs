use crate::coords::{ClampBounds, Vec2};
use crate::paint::BlendMode;
use crate::region::{BrushId, RegionId};
use crate::scene::{Shape, ShapeKind};
use crate::theme::OverrideId;

/// Drawing state: everything a shape builder needs besides its own parameters.
///
/// Handles (`brush`, `region`) index into canvas-owned tables and are only
/// meaningful while the referenced region is alive and uncleared.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DrawState {
    pub x: i32,
    pub y: i32,
    pub palette_override: OverrideId,
    pub brush: Option<BrushId>,
    pub clamp: ClampBounds,
    pub blend_mode: BlendMode,
    pub region: Option<RegionId>,
}

impl DrawState {
    /// State with the given clamp and everything else at its default.
    pub fn with_clamp(clamp: ClampBounds) -> Self {
        Self { clamp, ..Self::default() }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Builds a shape at state-relative `x, y` with this state's clamp, brush and blend mode.
    #[inline]
    pub fn shape(&self, kind: ShapeKind, x: f32, y: f32, width: f32, height: f32) -> Shape {
        self.shape_clamped(kind, self.clamp, x, y, width, height)
    }

    /// Like [`shape`](Self::shape) but with an explicit clamp.
    #[inline]
    pub fn shape_clamped(
        &self,
        kind: ShapeKind,
        clamp: ClampBounds,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Shape {
        Shape::new(
            kind,
            clamp,
            self.brush,
            self.blend_mode,
            self.x as f32 + x,
            self.y as f32 + y,
            width,
            height,
        )
    }
}
