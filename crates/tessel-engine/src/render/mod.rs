//! GPU-facing output formats.
//!
//! The canvas never talks to a device itself. It produces [`ShapeInstance`]
//! buffers (`bytemuck::Pod`, with a matching `wgpu::VertexBufferLayout`) and
//! blend states that a backend feeds straight into its pipelines.
//!
//! Convention:
//! - coordinates are target pixels (top-left origin, +Y down)
//! - colors in the gradient atlas are premultiplied RGBA8

mod blend;
mod instance;

pub use instance::{shape_params, BrushInstance, ParamContext, ShapeInstance};
