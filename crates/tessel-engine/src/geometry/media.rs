//! Shapes that reference cached or external content: text, images, shaders, lines.

use crate::atlas::ImageHandle;
use crate::canvas::DrawState;
use crate::region::{LineId, TextId};
use crate::scene::{Direction, ShaderId, Shape, ShapeKind};

#[allow(clippy::too_many_arguments)]
pub fn text(
    state: &DrawState,
    text: TextId,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    direction: Direction,
) -> Shape {
    state.shape(ShapeKind::Text { text, direction }, x, y, width, height)
}

/// Image or rasterized SVG drawn at its natural size.
pub fn image(state: &DrawState, image: ImageHandle, x: f32, y: f32, width: f32, height: f32) -> Shape {
    state.shape(ShapeKind::Image { image }, x, y, width, height)
}

pub fn shader(state: &DrawState, shader: ShaderId, x: f32, y: f32, width: f32, height: f32) -> Shape {
    state.shape(ShapeKind::Shader { shader }, x, y, width, height)
}

#[allow(clippy::too_many_arguments)]
pub fn line(
    state: &DrawState,
    line: LineId,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    line_width: f32,
) -> Shape {
    state.shape(ShapeKind::Line { line, line_width }, x, y, width, height)
}

/// Area between a line and the horizontal at `fill_position`.
#[allow(clippy::too_many_arguments)]
pub fn line_fill(
    state: &DrawState,
    line: LineId,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fill_position: f32,
) -> Shape {
    state.shape(ShapeKind::LineFill { line, fill_position }, x, y, width, height)
}
