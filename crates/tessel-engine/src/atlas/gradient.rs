use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::paint::Brush;

use super::{AtlasRect, ShelfPacker};

/// Content key of one gradient row (hash of its quantized texels).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GradientKey(pub u64);

/// Weak reference into the gradient atlas: key plus the rectangle it had when resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GradientHandle {
    pub key: GradientKey,
    pub rect: AtlasRect,
    pub generation: u32,
}

/// Shared texture of gradient rows. Every brush becomes one row of
/// `resolution` RGBA8 texels; identical rows are stored once.
///
/// Rows are reference counted by the regions holding them. A row nobody
/// references stays packed so it can be revived cheaply, and is swept the
/// next time the texture runs out of room.
#[derive(Debug)]
pub struct GradientAtlas {
    resolution: u32,
    packer: ShelfPacker<GradientKey>,
    rows: HashMap<GradientKey, Vec<[u8; 4]>>,
    refs: HashMap<GradientKey, u32>,
    texels: Vec<[u8; 4]>,
    dirty: bool,
}

impl GradientAtlas {
    pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn new(resolution: u32, initial_size: u32, padding: u32) -> Self {
        let resolution = resolution.max(1);
        let initial = initial_size.max(resolution + padding);
        let packer = ShelfPacker::new(initial, initial, padding);
        let texels = vec![[0u8; 4]; (packer.width() * packer.height()) as usize];
        Self {
            resolution,
            packer,
            rows: HashMap::new(),
            refs: HashMap::new(),
            texels,
            dirty: false,
        }
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
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

    /// Rows currently packed, referenced or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.packer.len()
    }

    /// Rows held by at least one region.
    pub fn live_len(&self) -> usize {
        self.refs.values().filter(|count| **count > 0).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packer.is_empty()
    }

    /// Row-major texels of the whole atlas texture.
    #[inline]
    pub fn texels(&self) -> &[[u8; 4]] {
        &self.texels
    }

    /// Returns whether texels changed since the last call, and resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Resolves `brush` to a row, inserting it if unseen, and takes a
    /// reference on it. Pair with [`release`](Self::release).
    pub fn add_brush(&mut self, brush: &Brush) -> GradientHandle {
        let row: Vec<[u8; 4]> = brush
            .sample_row(self.resolution as usize)
            .into_iter()
            .map(|c| c.to_rgba8())
            .collect();

        let mut hasher = DefaultHasher::new();
        row.hash(&mut hasher);
        let key = GradientKey(hasher.finish());
        *self.refs.entry(key).or_insert(0) += 1;

        if let Some(rect) = self.packer.get(&key) {
            return GradientHandle { key, rect, generation: self.packer.generation() };
        }

        let generation = self.packer.generation();
        let rect = match self.packer.try_insert(key, self.resolution, 1) {
            Some(rect) => rect,
            None => {
                self.sweep_unreferenced();
                self.packer.insert(key, self.resolution, 1)
            }
        };
        self.rows.insert(key, row);

        if self.packer.generation() != generation {
            self.rebuild_texels();
        } else {
            self.blit(key, rect);
        }
        self.dirty = true;

        GradientHandle { key, rect, generation: self.packer.generation() }
    }

    /// Current rectangle for `handle`, following any reflow since it was issued.
    pub fn resolve(&self, handle: GradientHandle) -> Option<AtlasRect> {
        if handle.generation == self.packer.generation() {
            return Some(handle.rect);
        }
        self.packer.get(&handle.key)
    }

    /// Gives back a reference taken by [`add_brush`](Self::add_brush).
    pub fn release(&mut self, key: GradientKey) {
        if let Some(count) = self.refs.get_mut(&key) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.packer.clear();
        self.rows.clear();
        self.refs.clear();
        self.texels.fill([0; 4]);
        self.dirty = true;
    }

    fn sweep_unreferenced(&mut self) {
        let unused: Vec<GradientKey> =
            self.refs.iter().filter(|(_, count)| **count == 0).map(|(key, _)| *key).collect();
        for key in &unused {
            self.packer.remove(key);
            self.rows.remove(key);
            self.refs.remove(key);
        }
        log::debug!("gradient atlas swept {} unreferenced rows", unused.len());
    }

    fn rebuild_texels(&mut self) {
        self.texels = vec![[0u8; 4]; (self.packer.width() * self.packer.height()) as usize];
        let keys: Vec<GradientKey> = self.packer.keys().copied().collect();
        for key in keys {
            if let Some(rect) = self.packer.get(&key) {
                self.blit(key, rect);
            }
        }
    }

    fn blit(&mut self, key: GradientKey, rect: AtlasRect) {
        let Some(row) = self.rows.get(&key) else { return };
        let start = (rect.y * self.packer.width() + rect.x) as usize;
        self.texels[start..start + row.len()].copy_from_slice(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, LinearGradient};

    #[test]
    fn identical_brushes_share_a_row() {
        let mut atlas = GradientAtlas::new(8, 16, 0);
        let a = atlas.add_brush(&Brush::from_argb(0xffff0000));
        let b = atlas.add_brush(&Brush::from_argb(0xffff0000));
        assert_eq!(a, b);
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn row_texels_are_written() {
        let mut atlas = GradientAtlas::new(4, 8, 0);
        let g = LinearGradient::from_colors(
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            &[Color::black(), Color::white()],
        );
        let h = atlas.add_brush(&Brush::linear(g));
        let start = (h.rect.y * atlas.width() + h.rect.x) as usize;
        assert_eq!(atlas.texels()[start], [0, 0, 0, 255]);
        assert_eq!(atlas.texels()[start + 3], [255, 255, 255, 255]);
        assert!(atlas.take_dirty());
        assert!(!atlas.take_dirty());
    }

    #[test]
    fn released_rows_make_room_before_growing() {
        let mut atlas = GradientAtlas::new(8, 16, 0);
        for i in 0..500u32 {
            let handle = atlas.add_brush(&Brush::from_argb(0xff000000 | i));
            atlas.release(handle.key);
        }
        let kept = atlas.add_brush(&Brush::from_argb(0xffffffff));
        assert_eq!((atlas.width(), atlas.height()), (16, 16));
        assert!(atlas.len() <= 32);
        assert_eq!(atlas.live_len(), 1);
        assert!(atlas.resolve(kept).is_some());
    }

    #[test]
    fn released_row_is_revived_in_place() {
        let mut atlas = GradientAtlas::new(8, 16, 0);
        let first = atlas.add_brush(&Brush::from_argb(0xff00ff00));
        atlas.release(first.key);
        assert_eq!(atlas.live_len(), 0);
        let again = atlas.add_brush(&Brush::from_argb(0xff00ff00));
        assert_eq!(again, first);
        assert_eq!(atlas.live_len(), 1);
    }

    #[test]
    fn stale_handles_resolve_after_growth() {
        let mut atlas = GradientAtlas::new(4, 4, 0);
        let first = atlas.add_brush(&Brush::from_argb(0xff000001));
        for i in 2..40u32 {
            atlas.add_brush(&Brush::from_argb(0xff000000 | i));
        }
        assert!(atlas.generation() > first.generation);
        let rect = atlas.resolve(first).expect("entry survives growth");
        let start = (rect.y * atlas.width() + rect.x) as usize;
        assert_eq!(atlas.texels()[start], Color::from_argb(0xff000001).to_rgba8());
    }
}
