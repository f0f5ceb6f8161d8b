//! Platform abstraction layer
//!
//! Handles terminal specifics for:
//! - Input events (held directions, one-shot commands)
//! - Time/frame pacing

pub mod input;
pub mod time;

pub use input::KeyTracker;
pub use time::FramePacer;
