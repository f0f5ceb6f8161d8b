//! Game state and core simulation types
//!
//! All mutable state of a run lives here and is owned by `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, clamp_into};
use super::difficulty::{DifficultyController, DifficultyParams};
use super::spawn::{ObstacleTemplate, SpawnScheduler, place_obstacle};
use crate::highscores::HighScore;
use crate::normalize_degrees;
use crate::sanitize_dt;
use crate::tuning::{CraftTuning, Tuning};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start command
    StartScreen,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart command
    GameOver,
}

/// Directional input, level-sensitive (currently held)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Steering {
    /// Unit-per-axis direction; opposing keys cancel out
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u32,
    /// Units per second
    pub speed: f32,
}

impl Craft {
    /// Spawn a craft centred in the field
    pub fn centered(tuning: &CraftTuning, field: Vec2) -> Self {
        let size = Vec2::new(tuning.width, tuning.height);
        Self {
            pos: clamp_into((field - size) * 0.5, size, field),
            size,
            lives: tuning.lives,
            speed: tuning.speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Point on the edge facing incoming obstacles, vertically centred
    pub fn forward_edge(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0)
    }

    pub fn is_destroyed(&self) -> bool {
        self.lives == 0
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Cosmetic spin in degrees per second
    pub spin: f32,
    /// Seconds since spawn
    pub age: f32,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            size,
            spin: 0.0,
            age: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Render-only rotation in degrees, derived from spin and age
    pub fn rotation(&self) -> f32 {
        normalize_degrees(self.spin * self.age)
    }

    /// True once the leading (right) edge is past the far boundary
    pub fn has_exited(&self, field: Vec2) -> bool {
        self.pos.x + self.size.x > field.x
    }
}

/// A laser bolt fired by the craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Projectile {
    /// Create a projectile centred on `center`
    pub fn centered_at(id: u32, center: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos: center - size / 2.0,
            vel,
            size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// True once either horizontal edge has left the field
    pub fn has_exited(&self, field: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x + self.size.x > field.x
    }
}

/// All live entities of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityState {
    pub craft: Craft,
    /// Active obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Active projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
}

impl EntityState {
    pub fn new(craft: Craft) -> Self {
        Self {
            craft,
            obstacles: Vec::new(),
            projectiles: Vec::new(),
        }
    }

    /// Move every entity by one step and drop the ones that left the field.
    ///
    /// The craft is clamped so its whole footprint stays inside the field.
    pub fn advance(&mut self, dt: f32, steer: Steering, field: Vec2) {
        let dt = sanitize_dt(dt);

        let craft = &mut self.craft;
        let step = steer.direction() * craft.speed * dt;
        craft.pos = clamp_into(craft.pos + step, craft.size, field);

        for obstacle in &mut self.obstacles {
            obstacle.pos += obstacle.vel * dt;
            obstacle.age += dt;
        }
        for projectile in &mut self.projectiles {
            projectile.pos += projectile.vel * dt;
        }

        self.obstacles.retain(|o| !o.has_exited(field));
        self.projectiles.retain(|p| !p.has_exited(field));
    }
}

/// Score and difficulty of the running session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    pub level: u32,
    /// Drift speed given to newly spawned obstacles
    pub obstacle_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
}

impl SessionState {
    pub fn new(params: DifficultyParams) -> Self {
        let mut session = Self {
            score: 0,
            level: 0,
            obstacle_speed: 0.0,
            spawn_interval: 0.0,
        };
        session.apply(params);
        session
    }

    pub fn apply(&mut self, params: DifficultyParams) {
        self.level = params.level;
        self.obstacle_speed = params.obstacle_speed;
        self.spawn_interval = params.spawn_interval;
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub session: SessionState,
    pub entities: EntityState,
    pub spawner: SpawnScheduler,
    pub difficulty: DifficultyController,
    /// Best score across sessions
    pub high_score: HighScore,
    /// Simulation tick counter (keeps counting across sessions)
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a game sitting on the start screen
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let difficulty = DifficultyController::new(tuning.difficulty);
        let params = difficulty.apply(0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::StartScreen,
            session: SessionState::new(params),
            entities: EntityState::new(Craft::centered(&tuning.craft, tuning.field.size())),
            spawner: SpawnScheduler::new(params.spawn_interval),
            difficulty,
            high_score: HighScore::new(high_score),
            time_ticks: 0,
            next_id: 1,
        }
    }

    #[inline]
    pub fn field(&self) -> Vec2 {
        self.tuning.field.size()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset session, entities and spawn timer for a fresh run
    pub fn reset_session(&mut self) {
        let params = self.difficulty.apply(0);
        self.session = SessionState::new(params);
        self.entities = EntityState::new(Craft::centered(&self.tuning.craft, self.field()));
        self.spawner = SpawnScheduler::new(params.spawn_interval);
        self.next_id = 1;
    }

    /// Run the spawn timer; places one obstacle on the entry edge when due
    pub fn spawn_tick(&mut self, dt: f32) -> Option<u32> {
        if !self.spawner.tick(dt) {
            return None;
        }
        let id = self.next_entity_id();
        let template = ObstacleTemplate {
            size: self.tuning.obstacle.size(),
            speed: self.session.obstacle_speed,
            max_spin: self.tuning.obstacle.max_spin,
        };
        let field = self.field();
        let obstacle = place_obstacle(id, &mut self.rng, field, &template);
        log::trace!("Spawned obstacle {} at y={:.1}", id, obstacle.pos.y);
        self.entities.obstacles.push(obstacle);
        Some(id)
    }

    /// Spawn a projectile on the craft's forward edge
    pub fn fire(&mut self) -> u32 {
        let id = self.next_entity_id();
        let tuning = self.tuning.projectile;
        let projectile = Projectile::centered_at(
            id,
            self.entities.craft.forward_edge(),
            Vec2::new(-tuning.speed, 0.0),
            tuning.size(),
        );
        self.entities.projectiles.push(projectile);
        id
    }
}
