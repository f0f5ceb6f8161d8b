//! Collision detection and resolution
//!
//! Two passes per tick, both on axis-aligned footprints:
//! 1. projectiles against obstacles (each entity pairs at most once)
//! 2. surviving obstacles against the craft

use serde::{Deserialize, Serialize};

use super::state::{Craft, Obstacle, Projectile};

/// An obstacle destroyed by a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kill {
    pub obstacle: u32,
    pub projectile: u32,
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReport {
    /// Projectile/obstacle pairs, both removed
    pub kills: Vec<Kill>,
    /// Obstacles that struck the craft, all removed
    pub hits: Vec<u32>,
    /// Whether the craft lost a life this tick
    pub life_lost: bool,
}

impl CollisionReport {
    /// Obstacles destroyed this tick, by projectile or by ramming the craft
    pub fn destroyed(&self) -> u64 {
        (self.kills.len() + self.hits.len()) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.kills.is_empty() && self.hits.is_empty()
    }
}

/// Resolve all collisions for this tick, mutating the entity collections.
///
/// Pairing in the first pass is first-match-wins in collection order. In the
/// second pass every overlapping obstacle is destroyed, but the craft loses
/// a single life no matter how many struck it at once.
pub fn resolve(
    obstacles: &mut Vec<Obstacle>,
    projectiles: &mut Vec<Projectile>,
    craft: &mut Craft,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    // Pass 1: projectile x obstacle
    let mut used = vec![false; projectiles.len()];
    let mut killed = vec![false; obstacles.len()];
    for (oi, obstacle) in obstacles.iter().enumerate() {
        let target = obstacle.bounds();
        let hit = (0..projectiles.len()).find(|&pi| !used[pi] && projectiles[pi].bounds().overlaps(&target));
        if let Some(pi) = hit {
            used[pi] = true;
            killed[oi] = true;
            report.kills.push(Kill {
                obstacle: obstacle.id,
                projectile: projectiles[pi].id,
            });
        }
    }

    if !report.kills.is_empty() {
        let mut i = 0;
        obstacles.retain(|_| {
            let keep = !killed[i];
            i += 1;
            keep
        });
        let mut i = 0;
        projectiles.retain(|_| {
            let keep = !used[i];
            i += 1;
            keep
        });
    }

    // Pass 2: obstacle x craft
    let craft_box = craft.bounds();
    obstacles.retain(|obstacle| {
        if obstacle.bounds().overlaps(&craft_box) {
            report.hits.push(obstacle.id);
            false
        } else {
            true
        }
    });

    if !report.hits.is_empty() {
        craft.lives = craft.lives.saturating_sub(1);
        report.life_lost = true;
    }

    report
}
