use anyhow::bail;

use crate::atlas::ImageUpload;
use crate::layer::LayerTarget;

use super::{LayerSubmission, RenderBackend, Screenshot};

/// Backend that keeps everything it is given; used to inspect canvas output
/// without a GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub submissions: Vec<LayerSubmission>,
    pub gradient_uploads: usize,
    pub image_uploads: Vec<ImageUpload>,
    pub captures: usize,
    /// Makes `submit_layer` fail for this layer index.
    pub fail_on_layer: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer indices in submission order.
    pub fn layer_order(&self) -> Vec<usize> {
        self.submissions.iter().map(|s| s.layer).collect()
    }

    pub fn clear(&mut self) {
        self.submissions.clear();
        self.gradient_uploads = 0;
        self.image_uploads.clear();
        self.captures = 0;
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_gradients(&mut self, _width: u32, _height: u32, _texels: &[[u8; 4]]) -> anyhow::Result<()> {
        self.gradient_uploads += 1;
        Ok(())
    }

    fn upload_images(&mut self, _width: u32, _height: u32, uploads: &[ImageUpload]) -> anyhow::Result<()> {
        self.image_uploads.extend_from_slice(uploads);
        Ok(())
    }

    fn submit_layer(&mut self, submission: &LayerSubmission) -> anyhow::Result<()> {
        if self.fail_on_layer == Some(submission.layer) {
            bail!("device lost");
        }
        self.submissions.push(submission.clone());
        Ok(())
    }

    fn capture(&mut self, _target: LayerTarget, width: u32, height: u32) -> anyhow::Result<Screenshot> {
        self.captures += 1;
        Ok(Screenshot::blank(width, height))
    }
}
