//! Time subsystem.
//!
//! Frame counting and frame-rate reporting for diagnostics. Nothing here
//! throttles the loop; frames are presented as fast as the driver allows.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameRate};
