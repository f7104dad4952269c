use crate::atlas::ImageHandle;
use crate::coords::{ClampBounds, Rect, Vec2};
use crate::paint::BlendMode;
use crate::region::{BrushId, LineId, TextId};

/// Opaque handle to a shader owned by the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderId(pub u32);

/// Reading direction of a text block; rotates glyph layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

/// Arc geometry: stroke thickness plus the swept angle around `center_radians`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcGeometry {
    pub thickness: f32,
    pub center_radians: f32,
    pub radians: f32,
}

/// Two endpoints in the normalized `[-1, 1]` frame plus stroke thickness.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentGeometry {
    pub a: Vec2,
    pub b: Vec2,
    pub thickness: f32,
}

/// Primitive-specific geometry. Points are normalized to the shape's box.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Fill,
    Rectangle,
    RoundedRectangle { rounding: f32 },
    Circle,
    Squircle { power: f32 },
    Diamond { rounding: f32 },
    RoundedArc(ArcGeometry),
    FlatArc(ArcGeometry),
    RoundedSegment(SegmentGeometry),
    FlatSegment(SegmentGeometry),
    QuadraticBezier { a: Vec2, b: Vec2, c: Vec2, thickness: f32 },
    Triangle { a: Vec2, b: Vec2, c: Vec2, rounding: f32, thickness: f32 },
    Text { text: TextId, direction: Direction },
    Image { image: ImageHandle },
    Shader { shader: ShaderId },
    Line { line: LineId, line_width: f32 },
    LineFill { line: LineId, fill_position: f32 },
    /// Samples `source` from a packed layer; emitted while compositing.
    Composite { layer: usize, source: Rect },
}

/// Data-free discriminant of [`ShapeKind`], used for batching and shader selection.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum ShapeTag {
    Fill,
    Rectangle,
    RoundedRectangle,
    Circle,
    Squircle,
    Diamond,
    RoundedArc,
    FlatArc,
    RoundedSegment,
    FlatSegment,
    QuadraticBezier,
    Triangle,
    Text,
    Image,
    Shader,
    Line,
    LineFill,
    Composite,
}

impl ShapeKind {
    pub fn tag(&self) -> ShapeTag {
        match self {
            ShapeKind::Fill => ShapeTag::Fill,
            ShapeKind::Rectangle => ShapeTag::Rectangle,
            ShapeKind::RoundedRectangle { .. } => ShapeTag::RoundedRectangle,
            ShapeKind::Circle => ShapeTag::Circle,
            ShapeKind::Squircle { .. } => ShapeTag::Squircle,
            ShapeKind::Diamond { .. } => ShapeTag::Diamond,
            ShapeKind::RoundedArc(_) => ShapeTag::RoundedArc,
            ShapeKind::FlatArc(_) => ShapeTag::FlatArc,
            ShapeKind::RoundedSegment(_) => ShapeTag::RoundedSegment,
            ShapeKind::FlatSegment(_) => ShapeTag::FlatSegment,
            ShapeKind::QuadraticBezier { .. } => ShapeTag::QuadraticBezier,
            ShapeKind::Triangle { .. } => ShapeTag::Triangle,
            ShapeKind::Text { .. } => ShapeTag::Text,
            ShapeKind::Image { .. } => ShapeTag::Image,
            ShapeKind::Shader { .. } => ShapeTag::Shader,
            ShapeKind::Line { .. } => ShapeTag::Line,
            ShapeKind::LineFill { .. } => ShapeTag::LineFill,
            ShapeKind::Composite { .. } => ShapeTag::Composite,
        }
    }
}

/// Immutable, normalized record of one primitive, ready for batching.
///
/// `x`, `y`, `width`, `height` are region-local and already include the
/// drawing-state offset; `clamp` is the clip in effect when it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub clamp: ClampBounds,
    pub brush: Option<BrushId>,
    pub blend_mode: BlendMode,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Anti-aliasing width in pixels; shadows store their blur radius here.
    pub pixel_width: f32,
    /// Border thickness. `None` means filled.
    pub thickness: Option<f32>,
}

impl Shape {
    pub const DEFAULT_PIXEL_WIDTH: f32 = 1.0;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: ShapeKind,
        clamp: ClampBounds,
        brush: Option<BrushId>,
        blend_mode: BlendMode,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            kind,
            clamp,
            brush,
            blend_mode,
            x,
            y,
            width,
            height,
            pixel_width: Self::DEFAULT_PIXEL_WIDTH,
            thickness: None,
        }
    }

    #[inline]
    pub fn with_pixel_width(mut self, pixel_width: f32) -> Self {
        self.pixel_width = pixel_width;
        self
    }

    #[inline]
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = Some(thickness);
        self
    }

    #[inline]
    pub fn tag(&self) -> ShapeTag {
        self.kind.tag()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Part of the shape that survives clamping; `None` means fully culled.
    #[inline]
    pub fn visible_bounds(&self) -> Option<Rect> {
        self.clamp.intersect_rect(self.bounds().normalized())
    }
}
