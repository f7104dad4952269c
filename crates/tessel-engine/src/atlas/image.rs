use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{AtlasRect, ShelfPacker};

/// Encoded payload kind. Decoding is done by the backend, never here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ImageFormat {
    Raster,
    Svg,
}

/// Encoded image (or SVG document) plus the size it should be rasterized at.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub data: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
    pub blur_radius: u32,
    pub format: ImageFormat,
}

impl Image {
    pub fn raster(data: impl Into<Arc<[u8]>>, width: u32, height: u32) -> Self {
        Self { data: data.into(), width, height, blur_radius: 0, format: ImageFormat::Raster }
    }

    pub fn svg(data: impl Into<Arc<[u8]>>, width: u32, height: u32, blur_radius: u32) -> Self {
        Self { data: data.into(), width, height, blur_radius, format: ImageFormat::Svg }
    }

    /// Atlas footprint: blurred entries need room for the blur on every side.
    #[inline]
    pub fn packed_size(&self) -> (u32, u32) {
        (self.width + 2 * self.blur_radius, self.height + 2 * self.blur_radius)
    }

    pub fn key(&self) -> ImageKey {
        let mut hasher = DefaultHasher::new();
        self.data.hash(&mut hasher);
        self.width.hash(&mut hasher);
        self.height.hash(&mut hasher);
        self.blur_radius.hash(&mut hasher);
        self.format.hash(&mut hasher);
        ImageKey(hasher.finish())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ImageKey(pub u64);

/// Weak reference into the image atlas.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ImageHandle {
    pub key: ImageKey,
    pub rect: AtlasRect,
    pub generation: u32,
}

/// Entry the backend must decode and write at `rect`.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub key: ImageKey,
    pub rect: AtlasRect,
    pub image: Image,
}

/// Shared texture for images and rasterized SVGs.
#[derive(Debug)]
pub struct ImageAtlas {
    packer: ShelfPacker<ImageKey>,
    sources: HashMap<ImageKey, Image>,
    pending: Vec<ImageKey>,
}

impl ImageAtlas {
    pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn new(initial_size: u32, padding: u32) -> Self {
        Self {
            packer: ShelfPacker::new(initial_size, initial_size, padding),
            sources: HashMap::new(),
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.packer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.packer.height()
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.packer.generation()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.packer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packer.is_empty()
    }

    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn add_image(&mut self, image: &Image) -> ImageHandle {
        let key = image.key();
        if let Some(rect) = self.packer.get(&key) {
            return ImageHandle { key, rect, generation: self.packer.generation() };
        }

        let generation = self.packer.generation();
        let (w, h) = image.packed_size();
        let rect = self.packer.insert(key, w, h);
        self.sources.insert(key, image.clone());

        if self.packer.generation() != generation {
            // Reflow moved everything; the whole texture must be rewritten.
            self.pending = self.packer.keys().copied().collect();
        } else {
            self.pending.push(key);
        }

        ImageHandle { key, rect, generation: self.packer.generation() }
    }

    pub fn resolve(&self, handle: ImageHandle) -> Option<AtlasRect> {
        if handle.generation == self.packer.generation() {
            return Some(handle.rect);
        }
        self.packer.get(&handle.key)
    }

    /// Drains the entries whose pixels the backend has not written yet.
    pub fn take_pending_uploads(&mut self) -> Vec<ImageUpload> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .into_iter()
            .filter_map(|key| {
                let rect = self.packer.get(&key)?;
                let image = self.sources.get(&key)?.clone();
                Some(ImageUpload { key, rect, image })
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.packer.clear();
        self.sources.clear();
        self.pending.clear();
    }
}
