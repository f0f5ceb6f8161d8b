//! Property tests for the simulation invariants

use std::collections::HashSet;

use glam::Vec2;
use proptest::prelude::*;

use asteroid_field::sim::{
    Craft, DifficultyController, EntityState, Obstacle, Projectile, Steering, resolve,
};
use asteroid_field::tuning::CraftTuning;

const FIELD: Vec2 = Vec2::new(800.0, 600.0);
const OBSTACLE: Vec2 = Vec2::new(40.0, 40.0);
const BOLT: Vec2 = Vec2::new(10.0, 4.0);

fn steering() -> impl Strategy<Value = Steering> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(up, down, left, right)| Steering {
        up,
        down,
        left,
        right,
    })
}

fn craft_at(pos: Vec2) -> Craft {
    let mut craft = Craft::centered(&CraftTuning::default(), FIELD);
    craft.pos = pos;
    craft
}

proptest! {
    #[test]
    fn craft_never_leaves_field(
        x in 0.0f32..=750.0,
        y in 0.0f32..=550.0,
        steps in prop::collection::vec((steering(), -1.0f32..5.0), 1..20),
    ) {
        let mut entities = EntityState::new(craft_at(Vec2::new(x, y)));
        for (steer, dt) in steps {
            entities.advance(dt, steer, FIELD);
            prop_assert!(entities.craft.bounds().within(FIELD));
        }
    }

    #[test]
    fn obstacle_removed_iff_leading_edge_crossed(
        x in 0.0f32..760.0,
        y in 0.0f32..560.0,
        speed in 0.0f32..600.0,
        dt in 0.0f32..0.1,
    ) {
        let mut entities = EntityState::new(craft_at(Vec2::ZERO));
        let vel = Vec2::new(speed, 0.0);
        entities.obstacles.push(Obstacle::new(1, Vec2::new(x, y), vel, OBSTACLE));
        entities.advance(dt, Steering::default(), FIELD);

        let end = x + speed * dt;
        let crossed = end + OBSTACLE.x > FIELD.x;
        prop_assert_eq!(entities.obstacles.is_empty(), crossed);
    }

    #[test]
    fn each_entity_pairs_at_most_once(
        obstacles in prop::collection::vec((0.0f32..760.0, 0.0f32..560.0), 0..12),
        bolts in prop::collection::vec((0.0f32..790.0, 0.0f32..596.0), 0..12),
    ) {
        // Craft parked in a corner nothing is generated near enough to matter
        let mut craft = craft_at(Vec2::ZERO);
        craft.size = Vec2::ZERO;

        let mut obs: Vec<Obstacle> = obstacles
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Obstacle::new(i as u32 + 1, Vec2::new(x, y), Vec2::ZERO, OBSTACLE))
            .collect();
        let mut prj: Vec<Projectile> = bolts
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Projectile {
                id: 100 + i as u32,
                pos: Vec2::new(x, y),
                vel: Vec2::ZERO,
                size: BOLT,
            })
            .collect();
        let before_obs = obs.clone();
        let before_prj = prj.clone();

        let report = resolve(&mut obs, &mut prj, &mut craft);

        let killed: HashSet<u32> = report.kills.iter().map(|k| k.obstacle).collect();
        let spent: HashSet<u32> = report.kills.iter().map(|k| k.projectile).collect();
        prop_assert_eq!(killed.len(), report.kills.len());
        prop_assert_eq!(spent.len(), report.kills.len());

        // Every kill was a real overlap and both sides are gone
        for kill in &report.kills {
            let o = before_obs.iter().find(|o| o.id == kill.obstacle).unwrap();
            let p = before_prj.iter().find(|p| p.id == kill.projectile).unwrap();
            prop_assert!(o.bounds().overlaps(&p.bounds()));
            prop_assert!(obs.iter().all(|o| o.id != kill.obstacle));
            prop_assert!(prj.iter().all(|p| p.id != kill.projectile));
        }
        prop_assert_eq!(obs.len() + report.kills.len(), before_obs.len());
        prop_assert_eq!(prj.len() + report.kills.len(), before_prj.len());

        // Nothing that still overlaps was left unpaired
        for o in &obs {
            prop_assert!(prj.iter().all(|p| !p.bounds().overlaps(&o.bounds())));
        }
    }

    #[test]
    fn simultaneous_hits_cost_one_life(
        offsets in prop::collection::vec((-30.0f32..40.0, -30.0f32..40.0), 1..8),
        lives in 1u32..5,
    ) {
        // Craft spans 375..425 x 275..325; every offset keeps a strict overlap
        let mut craft = Craft::centered(&CraftTuning::default(), FIELD);
        craft.lives = lives;
        let mut obs: Vec<Obstacle> = offsets
            .iter()
            .enumerate()
            .map(|(i, &(dx, dy))| {
                Obstacle::new(i as u32 + 1, craft.pos + Vec2::new(dx, dy), Vec2::ZERO, OBSTACLE)
            })
            .collect();
        let mut prj = Vec::new();

        let report = resolve(&mut obs, &mut prj, &mut craft);

        prop_assert!(report.life_lost);
        prop_assert_eq!(craft.lives, lives - 1);
        prop_assert_eq!(report.hits.len(), offsets.len());
        prop_assert!(obs.is_empty());
    }

    #[test]
    fn difficulty_is_monotone(a in 0u64..10_000, b in 0u64..10_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let difficulty = DifficultyController::default();
        let easy = difficulty.apply(lo);
        let hard = difficulty.apply(hi);
        prop_assert!(hard.level >= easy.level);
        prop_assert!(hard.obstacle_speed >= easy.obstacle_speed);
        prop_assert!(hard.spawn_interval <= easy.spawn_interval);
        prop_assert!(hard.spawn_interval >= 0.25);
    }
}
