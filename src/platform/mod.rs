//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (wall clock, frame pacing)
//! - Input events (queued as discrete commands)

pub mod input;
pub mod time;

pub use input::{InputCommand, InputQueue};
pub use time::{Clock, ManualClock};
pub use time::{FramePacer, SystemClock};
