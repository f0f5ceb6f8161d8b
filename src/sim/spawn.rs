//! Obstacle spawn scheduling
//!
//! Spawn cadence is driven by accumulated simulation time rather than a
//! frame counter, so density stays correct when the tick length varies.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::sanitize_dt;

/// Recurring spawn timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Seconds between spawns
    interval: f32,
    /// Seconds accumulated since the last spawn
    elapsed: f32,
}

impl SpawnScheduler {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Change the interval; only affects the next scheduling decision
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval.max(f32::EPSILON);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advance the timer; returns true when exactly one obstacle is due.
    ///
    /// At most one spawn per tick. Any backlog beyond one interval carries
    /// over to the following ticks.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += sanitize_dt(dt);
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }
}

/// What a freshly spawned obstacle looks like
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleTemplate {
    pub size: Vec2,
    /// Drift speed along +x
    pub speed: f32,
    /// Spin is drawn uniformly from `[-max_spin, max_spin]`
    pub max_spin: f32,
}

/// Place a new obstacle on the entry edge at a random height
pub fn place_obstacle<R: Rng>(id: u32, rng: &mut R, field: Vec2, template: &ObstacleTemplate) -> Obstacle {
    let max_y = (field.y - template.size.y).max(0.0);
    let y = if max_y > 0.0 { rng.random_range(0.0..=max_y) } else { 0.0 };
    let max_spin = template.max_spin.abs();
    let spin = if max_spin > 0.0 {
        rng.random_range(-max_spin..=max_spin)
    } else {
        0.0
    };

    let mut obstacle = Obstacle::new(
        id,
        Vec2::new(0.0, y),
        Vec2::new(template.speed, 0.0),
        template.size,
    );
    obstacle.spin = spin;
    obstacle
}
