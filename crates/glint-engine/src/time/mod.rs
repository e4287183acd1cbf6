//! Frame timing.
//!
//! [`FrameDriver`](crate::core::FrameDriver) owns one [`FrameClock`] and
//! ticks it once per frame; apps read the resulting [`FrameTime`] from their
//! frame context.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
