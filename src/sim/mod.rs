//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or storage dependencies

pub mod aabb;
pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, clamp_into};
pub use collision::{CollisionReport, Kill, resolve};
pub use difficulty::{DifficultyController, DifficultyParams};
pub use spawn::{ObstacleTemplate, SpawnScheduler, place_obstacle};
pub use state::{
    Craft, EntityState, GamePhase, GameState, Obstacle, Projectile, SessionState, Steering,
};
pub use tick::{GameEvent, TickInput, TickOutcome, tick};
