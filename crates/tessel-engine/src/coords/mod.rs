//! Coordinate and geometry types shared by the canvas, builders and layers.
//!
//! Canonical CPU space:
//! - Logical pixels, origin top-left
//! - +X right, +Y down
//! - Region-local unless a type says otherwise
//!
//! Shader-facing geometry is re-expressed in a normalized `[-1, 1]` frame by
//! `geometry`; nothing in this module knows about that frame.

mod clamp;
mod rect;
mod vec2;

pub use clamp::ClampBounds;
pub use rect::Rect;
pub use vec2::Vec2;
