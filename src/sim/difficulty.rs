//! Difficulty progression
//!
//! Level, obstacle speed and spawn interval are pure functions of score.
//! Difficulty never eases within a session.

use serde::{Deserialize, Serialize};

use crate::tuning::DifficultyTuning;

/// Parameters derived from the current score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub level: u32,
    pub obstacle_speed: f32,
    pub spawn_interval: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyController {
    tuning: DifficultyTuning,
}

impl DifficultyController {
    pub fn new(tuning: DifficultyTuning) -> Self {
        Self { tuning }
    }

    /// One level per `points_per_level` points, starting at level 1
    pub fn apply(&self, score: u64) -> DifficultyParams {
        let t = &self.tuning;
        let steps = score / t.points_per_level.max(1);
        let level = u32::try_from(steps).unwrap_or(u32::MAX - 1) + 1;
        let steps = steps as f32;
        DifficultyParams {
            level,
            obstacle_speed: (t.base_speed + steps * t.speed_step).min(t.max_speed),
            spawn_interval: (t.base_interval - steps * t.interval_step).max(t.min_interval),
        }
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(DifficultyTuning::default())
    }
}
