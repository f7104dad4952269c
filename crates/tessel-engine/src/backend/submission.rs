use crate::coords::Rect;
use crate::layer::LayerTarget;
use crate::paint::BlendMode;
use crate::render::ShapeInstance;
use crate::scene::{Line, ShapeTag};
use crate::text::Text;

/// One draw call: instances sharing a pipeline (primitive kind + blend state).
#[derive(Debug, Clone)]
pub struct SubmitBatch {
    pub blend_mode: BlendMode,
    pub tag: ShapeTag,
    pub instances: Vec<ShapeInstance>,
}

impl SubmitBatch {
    #[inline]
    pub fn blend_state(&self) -> wgpu::BlendState {
        self.blend_mode.blend_state()
    }

    /// Raw instance buffer contents.
    #[inline]
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// Everything the backend needs to redraw one layer.
///
/// Batches are in paint order. Text and line shapes refer to entries of
/// `texts` and `lines` by index.
#[derive(Debug, Clone)]
pub struct LayerSubmission {
    pub pass: usize,
    pub layer: usize,
    pub target: LayerTarget,
    pub width: u32,
    pub height: u32,
    /// Parts of the target to redraw; everything else keeps last frame's pixels.
    pub invalid_rects: Vec<Rect>,
    pub batches: Vec<SubmitBatch>,
    pub texts: Vec<Text>,
    pub lines: Vec<Line>,
}

impl LayerSubmission {
    pub fn new(pass: usize, layer: usize, target: LayerTarget, width: u32, height: u32) -> Self {
        Self {
            pass,
            layer,
            target,
            width,
            height,
            invalid_rects: Vec::new(),
            batches: Vec::new(),
            texts: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(|b| b.instances.len()).sum()
    }

    /// Appends instances, extending the last batch when it uses the same pipeline.
    pub fn push(&mut self, blend_mode: BlendMode, tag: ShapeTag, instances: Vec<ShapeInstance>) {
        if instances.is_empty() {
            return;
        }
        match self.batches.last_mut() {
            Some(last) if last.blend_mode == blend_mode && last.tag == tag => {
                last.instances.extend(instances);
            }
            _ => self.batches.push(SubmitBatch { blend_mode, tag, instances }),
        }
    }
}
