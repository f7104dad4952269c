//! Shape descriptors and the per-region batcher that queues them.
//!
//! Responsibilities:
//! - describe one normalized primitive per [`Shape`]
//! - group queued shapes into draw-call sized batches without breaking paint order

mod batcher;
mod line;
mod shape;

pub use batcher::{BatchKey, ShapeBatch, ShapeBatcher};
pub use line::Line;
pub use shape::{ArcGeometry, Direction, SegmentGeometry, ShaderId, Shape, ShapeKind, ShapeTag};
