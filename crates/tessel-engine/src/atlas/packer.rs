//! Row-based ("shelf") rectangle packer shared by every atlas and by
//! intermediate layers.
//!
//! Each shelf has a fixed height set by the tallest entry placed on it. When an
//! entry fits no shelf, a new one is opened below the last. When the texture is
//! full and entries have been removed, live entries are first repacked at the
//! current size; only when that still leaves no room does it grow (doubling the
//! shorter side). `generation` counts every reflow so holders of stale
//! rectangles can detect them.

use std::collections::HashMap;
use std::hash::Hash;

/// Pixel-space rectangle inside a packed texture.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRect {
    /// Normalized `[u_min, v_min, u_max, v_max]` for a texture of the given size.
    #[inline]
    pub fn uv(self, texture_width: u32, texture_height: u32) -> [f32; 4] {
        let iw = 1.0 / texture_width.max(1) as f32;
        let ih = 1.0 / texture_height.max(1) as f32;
        [
            self.x as f32 * iw,
            self.y as f32 * ih,
            (self.x + self.width) as f32 * iw,
            (self.y + self.height) as f32 * ih,
        ]
    }
}

#[derive(Debug, Clone)]
struct Shelf {
    y: u32,
    height: u32,
    cursor_x: u32,
}

#[derive(Debug, Clone)]
pub struct ShelfPacker<K> {
    width: u32,
    height: u32,
    padding: u32,
    shelves: Vec<Shelf>,
    rects: HashMap<K, AtlasRect>,
    /// Live keys in insertion order; drives repacking.
    order: Vec<K>,
    /// Set by `remove`; the shelves hold space no live entry uses.
    has_holes: bool,
    generation: u32,
}

impl<K: Hash + Eq + Clone> ShelfPacker<K> {
    pub fn new(width: u32, height: u32, padding: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            padding,
            shelves: Vec::new(),
            rects: HashMap::new(),
            order: Vec::new(),
            has_holes: false,
            generation: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<AtlasRect> {
        self.rects.get(key).copied()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Places `key` and returns its rectangle. Existing keys keep their place.
    ///
    /// Never fails: the packer compacts, then grows until the entry fits,
    /// either of which may move every previously returned rectangle.
    pub fn insert(&mut self, key: K, width: u32, height: u32) -> AtlasRect {
        if let Some(rect) = self.try_insert(key.clone(), width, height) {
            return rect;
        }
        loop {
            self.grow();
            if let Some(rect) = self.allocate(width, height) {
                self.record(key, rect);
                return rect;
            }
        }
    }

    /// Places `key` without growing the texture. Removed entries' space is
    /// reclaimed by compacting first; `None` means the texture is full.
    pub fn try_insert(&mut self, key: K, width: u32, height: u32) -> Option<AtlasRect> {
        if let Some(rect) = self.rects.get(&key) {
            return Some(*rect);
        }
        let rect = match self.allocate(width, height) {
            Some(rect) => rect,
            None if self.has_holes => {
                self.compact();
                self.allocate(width, height)?
            }
            None => return None,
        };
        self.record(key, rect);
        Some(rect)
    }

    /// Forgets `key`. Its space is reclaimed on the next repack.
    pub fn remove(&mut self, key: &K) -> Option<AtlasRect> {
        let rect = self.rects.remove(key)?;
        self.order.retain(|k| k != key);
        self.has_holes = true;
        Some(rect)
    }

    pub fn clear(&mut self) {
        self.shelves.clear();
        self.rects.clear();
        self.order.clear();
        self.has_holes = false;
    }

    fn record(&mut self, key: K, rect: AtlasRect) {
        self.rects.insert(key.clone(), rect);
        self.order.push(key);
    }

    fn allocate(&mut self, width: u32, height: u32) -> Option<AtlasRect> {
        let padded_w = width + self.padding;
        let padded_h = height + self.padding;

        if padded_w > self.width {
            return None;
        }

        for shelf in &mut self.shelves {
            if shelf.height >= padded_h && shelf.cursor_x + padded_w <= self.width {
                let rect = AtlasRect { x: shelf.cursor_x, y: shelf.y, width, height };
                shelf.cursor_x += padded_w;
                return Some(rect);
            }
        }

        let shelf_y = self.shelves.last().map_or(0, |s| s.y + s.height);
        if shelf_y + padded_h > self.height {
            return None;
        }

        self.shelves.push(Shelf { y: shelf_y, height: padded_h, cursor_x: padded_w });
        Some(AtlasRect { x: 0, y: shelf_y, width, height })
    }

    fn grow(&mut self) {
        if self.width <= self.height {
            self.width *= 2;
        } else {
            self.height *= 2;
        }
        self.generation = self.generation.wrapping_add(1);
        log::debug!(
            "atlas grown to {}x{} (generation {})",
            self.width,
            self.height,
            self.generation
        );
        self.repack();
    }

    fn compact(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        log::debug!(
            "atlas compacted at {}x{}, {} live entries (generation {})",
            self.width,
            self.height,
            self.rects.len(),
            self.generation
        );
        self.repack();
    }

    /// Re-places every live entry from scratch, growing further if needed.
    fn repack(&mut self) {
        let entries: Vec<(K, AtlasRect)> = self
            .order
            .iter()
            .filter_map(|k| self.rects.get(k).map(|r| (k.clone(), *r)))
            .collect();

        'retry: loop {
            self.shelves.clear();
            for (key, old) in &entries {
                match self.allocate(old.width, old.height) {
                    Some(rect) => {
                        self.rects.insert(key.clone(), rect);
                    }
                    None => {
                        if self.width <= self.height {
                            self.width *= 2;
                        } else {
                            self.height *= 2;
                        }
                        continue 'retry;
                    }
                }
            }
            self.has_holes = false;
            return;
        }
    }
}
