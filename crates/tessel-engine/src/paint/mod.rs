//! Paint model: colors, gradients, brushes and blend modes.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - logical brushes and their atlas-resolved form
//!
//! Geometry types remain in `coords`.

pub mod blend;
pub mod brush;
pub mod color;
pub mod gradient;

pub use blend::BlendMode;
pub use brush::{Brush, PackedBrush};
pub use color::Color;
pub use gradient::{ColorStop, LinearGradient, SpreadMode};
