//! Asteroid Field - A side-scrolling asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, difficulty)
//! - `app`: Fixed-timestep driver wiring the simulation to its collaborators
//! - `renderer`: Terminal rendering
//! - `platform`: Keyboard input and frame pacing
//! - `persistence`: High score storage
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::{App, FrameResult};
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest wall-clock frame fed into the accumulator (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.25;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Craft defaults
    pub const CRAFT_SIZE: f32 = 50.0;
    pub const CRAFT_SPEED: f32 = 300.0; // 5 units per frame at 60 Hz
    pub const CRAFT_LIVES: u32 = 3;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_BASE_SPEED: f32 = 240.0;
    /// Maximum cosmetic spin (degrees per second, either direction)
    pub const OBSTACLE_MAX_SPIN: f32 = 300.0;

    /// Projectile defaults (travels against the obstacle drift)
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 4.0;
    pub const PROJECTILE_SPEED: f32 = 600.0;

    /// Difficulty curve
    pub const POINTS_PER_LEVEL: u64 = 10;
    pub const SPEED_STEP: f32 = 60.0;
    /// Closing speed must stay under projectile + obstacle width per tick
    pub const OBSTACLE_MAX_SPEED: f32 = 1800.0;
    pub const BASE_SPAWN_INTERVAL: f32 = 1.0;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.1;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.25;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Treat negative or non-finite time steps as zero
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
