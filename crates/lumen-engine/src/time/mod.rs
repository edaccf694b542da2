//! Time subsystem.
//!
//! Effects are animated from a single seconds value. `FrameClock` produces it
//! for live rendering; `FrameTime::at` pins it for snapshots and tests.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
