//! Tessel engine crate.
//!
//! CPU side of a 2D vector canvas: a stateful drawing context turns shape
//! calls into normalized, batched shape instances, organized in a tree of
//! regions composited through layers. GPU submission, shaders, font shaping
//! and image decoding are left to a [`backend::RenderBackend`].

pub mod atlas;
pub mod backend;
pub mod canvas;
pub mod coords;
pub mod geometry;
pub mod layer;
pub mod logging;
pub mod paint;
pub mod region;
pub mod render;
pub mod scene;
pub mod text;
pub mod theme;
pub mod time;

pub use canvas::{Canvas, CanvasConfig, DrawState};
