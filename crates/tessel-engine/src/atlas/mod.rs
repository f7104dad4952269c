//! Canvas-owned texture atlases that brushes and image shapes resolve against.
//!
//! Shapes hold only keys and rectangles into these atlases, never ownership.
//! Insertions may reflow the whole layout, so they belong between frames.

mod gradient;
mod image;
mod packer;

pub use gradient::{GradientAtlas, GradientHandle, GradientKey};
pub use image::{Image, ImageAtlas, ImageFormat, ImageHandle, ImageKey, ImageUpload};
pub use packer::{AtlasRect, ShelfPacker};
