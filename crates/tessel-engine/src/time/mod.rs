//! Frame timing.
//!
//! Only a time/delta accessor is exposed; animation is the caller's concern.

mod frame_time;

pub use frame_time::FrameTime;
