//! Time subsystem.
//!
//! - one `FrameClock` per stage
//! - call `tick()` once per frame to obtain the `GameTime` handed to actors

mod frame_clock;

pub use frame_clock::{FrameClock, GameTime};
