use bytemuck::{Pod, Zeroable};

use crate::atlas::ImageAtlas;
use crate::coords::{Rect, Vec2};
use crate::scene::{Shape, ShapeKind};

/// Per-instance vertex data for one shape, in target pixels.
///
/// `params` carries the primitive geometry; its layout depends on `kind`
/// (see [`shape_params`]).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    /// x, y, width, height
    pub bounds: [f32; 4],
    /// left, top, right, bottom
    pub clamp: [f32; 4],
    pub params: [f32; 8],
    /// Gradient row in the gradient atlas: u_min, v_min, u_max, v_max.
    pub brush_uv: [f32; 4],
    /// Gradient axis start.xy, end.xy.
    pub brush_axis: [f32; 4],
    pub pixel_width: f32,
    /// Negative when filled.
    pub thickness: f32,
    pub kind: u32,
    pub spread: u32,
}

/// Resolved brush data attached to an instance.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BrushInstance {
    pub uv: [f32; 4],
    pub start: Vec2,
    pub end: Vec2,
    pub spread: u32,
}

/// Lookups needed to turn handles inside a [`ShapeKind`] into shader parameters.
#[derive(Debug, Copy, Clone)]
pub struct ParamContext<'a> {
    /// Index of the region's first text in the submission's text table.
    pub text_base: u32,
    /// Index of the region's first line in the submission's line table.
    pub line_base: u32,
    pub image_atlas: &'a ImageAtlas,
}

impl ShapeInstance {
    const ATTRS: [wgpu::VertexAttribute; 10] = wgpu::vertex_attr_array![
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32,
        8 => Float32,
        9 => Uint32,
        10 => Uint32,
    ];

    /// Instance-rate buffer layout; location 0 is left for the unit quad.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Builds the instance for `shape` drawn at `offset` and clipped to `clip`.
    ///
    /// Returns `None` when nothing of the shape survives the clip.
    pub fn from_shape(
        shape: &Shape,
        offset: Vec2,
        clip: Rect,
        brush: BrushInstance,
        params: [f32; 8],
    ) -> Option<Self> {
        let clamp = shape.clamp.to_rect().translated(offset).intersect(clip)?;
        let bounds = shape.bounds().translated(offset);
        let start = brush.start + offset;
        let end = brush.end + offset;

        Some(Self {
            bounds: [bounds.x(), bounds.y(), bounds.width(), bounds.height()],
            clamp: [clamp.x(), clamp.y(), clamp.right(), clamp.bottom()],
            params,
            brush_uv: brush.uv,
            brush_axis: [start.x, start.y, end.x, end.y],
            pixel_width: shape.pixel_width,
            thickness: shape.thickness.unwrap_or(-1.0),
            kind: shape.tag() as u32,
            spread: brush.spread,
        })
    }
}

/// Shader parameters for a shape kind.
pub fn shape_params(kind: &ShapeKind, ctx: &ParamContext<'_>) -> [f32; 8] {
    let mut p = [0.0; 8];
    match kind {
        ShapeKind::Fill | ShapeKind::Rectangle | ShapeKind::Circle => {}
        ShapeKind::RoundedRectangle { rounding } | ShapeKind::Diamond { rounding } => {
            p[0] = *rounding;
        }
        ShapeKind::Squircle { power } => p[0] = *power,
        ShapeKind::RoundedArc(arc) | ShapeKind::FlatArc(arc) => {
            p[..3].copy_from_slice(&[arc.thickness, arc.center_radians, arc.radians]);
        }
        ShapeKind::RoundedSegment(s) | ShapeKind::FlatSegment(s) => {
            p[..5].copy_from_slice(&[s.a.x, s.a.y, s.b.x, s.b.y, s.thickness]);
        }
        ShapeKind::QuadraticBezier { a, b, c, thickness } => {
            p[..7].copy_from_slice(&[a.x, a.y, b.x, b.y, c.x, c.y, *thickness]);
        }
        ShapeKind::Triangle { a, b, c, rounding, thickness } => {
            p = [a.x, a.y, b.x, b.y, c.x, c.y, *rounding, *thickness];
        }
        ShapeKind::Text { text, direction } => {
            p[0] = (ctx.text_base + text.0) as f32;
            p[1] = *direction as u32 as f32;
        }
        ShapeKind::Image { image } => match ctx.image_atlas.resolve(*image) {
            Some(rect) => {
                let uv = rect.uv(ctx.image_atlas.width(), ctx.image_atlas.height());
                p[..4].copy_from_slice(&uv);
            }
            None => log::warn!("image {:?} is no longer in the atlas", image.key),
        },
        ShapeKind::Shader { shader } => p[0] = shader.0 as f32,
        ShapeKind::Line { line, line_width } => {
            p[0] = (ctx.line_base + line.0) as f32;
            p[1] = *line_width;
        }
        ShapeKind::LineFill { line, fill_position } => {
            p[0] = (ctx.line_base + line.0) as f32;
            p[1] = *fill_position;
        }
        ShapeKind::Composite { layer, source } => {
            p[..5].copy_from_slice(&[
                *layer as f32,
                source.x(),
                source.y(),
                source.width(),
                source.height(),
            ]);
        }
    }
    p
}
