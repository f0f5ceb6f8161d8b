//! Frame pacing
//!
//! The only blocking call in the game loop: a bounded sleep for whatever is
//! left of the frame budget.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Mark the start of a frame; returns seconds since the previous mark
    pub fn begin(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.frame_start).as_secs_f32();
        self.frame_start = now;
        dt
    }

    /// Sleep out the rest of the frame budget (never longer than one frame)
    pub fn wait(&self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
    }
}
