//! Data-driven game balance
//!
//! Every value here has a default matching the classic 800x600, 60 fps
//! game. Settings files may override any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Field bounds, fixed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl FieldTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Player craft tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftTuning {
    pub width: f32,
    pub height: f32,
    /// Movement speed in units per second
    pub speed: f32,
    pub lives: u32,
}

impl Default for CraftTuning {
    fn default() -> Self {
        Self {
            width: CRAFT_SIZE,
            height: CRAFT_SIZE,
            speed: CRAFT_SPEED,
            lives: CRAFT_LIVES,
        }
    }
}

/// Obstacle tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub width: f32,
    pub height: f32,
    /// Maximum cosmetic spin in degrees per second
    pub max_spin: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
            max_spin: OBSTACLE_MAX_SPIN,
        }
    }
}

impl ObstacleTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Projectile tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub width: f32,
    pub height: f32,
    /// Speed in units per second, directed against the obstacle drift
    pub speed: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
        }
    }
}

impl ProjectileTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Difficulty curve, keyed off `score / points_per_level`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub points_per_level: u64,
    /// Obstacle drift speed at level 1 (units per second)
    pub base_speed: f32,
    pub speed_step: f32,
    /// Drift speed ceiling; above it a bolt can skip past an obstacle in one tick
    pub max_speed: f32,
    /// Spawn interval at level 1 (seconds)
    pub base_interval: f32,
    pub interval_step: f32,
    pub min_interval: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            points_per_level: POINTS_PER_LEVEL,
            base_speed: OBSTACLE_BASE_SPEED,
            speed_step: SPEED_STEP,
            max_speed: OBSTACLE_MAX_SPEED,
            base_interval: BASE_SPAWN_INTERVAL,
            interval_step: SPAWN_INTERVAL_STEP,
            min_interval: MIN_SPAWN_INTERVAL,
        }
    }
}

/// All gameplay tuning
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field: FieldTuning,
    pub craft: CraftTuning,
    pub obstacle: ObstacleTuning,
    pub projectile: ProjectileTuning,
    pub difficulty: DifficultyTuning,
}
