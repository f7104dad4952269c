//! Boundary to the GPU submission backend.
//!
//! The canvas hands a backend ready-made instance buffers per layer; device,
//! pipeline and shader management live entirely on the other side of
//! [`RenderBackend`].

mod recording;
mod screenshot;
mod submission;

pub use recording::RecordingBackend;
pub use screenshot::Screenshot;
pub use submission::{LayerSubmission, SubmitBatch};

use crate::atlas::ImageUpload;
use crate::layer::LayerTarget;

pub trait RenderBackend {
    /// Replaces the gradient atlas texture (premultiplied RGBA8 rows).
    fn upload_gradients(&mut self, width: u32, height: u32, texels: &[[u8; 4]]) -> anyhow::Result<()>;

    /// Decodes and writes newly packed images into an image atlas of the given size.
    fn upload_images(&mut self, width: u32, height: u32, uploads: &[ImageUpload]) -> anyhow::Result<()>;

    /// Redraws the invalid parts of one layer.
    fn submit_layer(&mut self, submission: &LayerSubmission) -> anyhow::Result<()>;

    /// Reads back the composite target.
    fn capture(&mut self, target: LayerTarget, width: u32, height: u32) -> anyhow::Result<Screenshot>;
}
