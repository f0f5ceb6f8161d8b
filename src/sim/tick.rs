//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::resolve;
use super::state::{GamePhase, GameState, Steering};
use crate::sanitize_dt;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held directions
    pub steer: Steering,
    /// Fire presses since the last tick, one projectile each
    pub fire: u32,
    /// Leave the start screen (edge-triggered)
    pub start: bool,
    /// Start over after game over (edge-triggered)
    pub restart: bool,
    /// Quit after this tick
    pub quit: bool,
}

impl TickInput {
    /// Drop the edge-triggered commands, keeping held directions
    pub fn held_only(&self) -> Self {
        Self {
            steer: self.steer,
            ..Default::default()
        }
    }
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new session began
    SessionStarted,
    /// A projectile was fired
    Fire,
    /// An obstacle was destroyed or the craft was struck
    Explosion,
    /// Difficulty rose to the given level
    LevelUp(u32),
    /// The best score was raised and should be persisted
    NewHighScore(u64),
    /// The craft ran out of lives
    GameOver { score: u64, high_score: u64 },
}

/// Result of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    /// The loop should stop after this tick
    pub quit: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let dt = sanitize_dt(dt);
    state.time_ticks += 1;

    match state.phase {
        GamePhase::StartScreen => {
            if input.start {
                start_session(state, &mut outcome.events);
            }
        }
        GamePhase::Playing => play(state, input, dt, &mut outcome.events),
        GamePhase::GameOver => {
            if input.restart {
                start_session(state, &mut outcome.events);
            }
        }
    }

    if input.quit {
        // A run cut short still counts toward the best score
        if state.phase == GamePhase::Playing && state.high_score.record(state.session.score) {
            outcome.events.push(GameEvent::NewHighScore(state.session.score));
        }
        log::info!("Quit requested at tick {}", state.time_ticks);
        outcome.quit = true;
    }

    outcome
}

fn start_session(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.reset_session();
    state.phase = GamePhase::Playing;
    log::info!(
        "Session started (seed {}, high score {})",
        state.seed,
        state.high_score.best()
    );
    events.push(GameEvent::SessionStarted);
}

fn play(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    for _ in 0..input.fire {
        state.fire();
        events.push(GameEvent::Fire);
    }

    state.spawn_tick(dt);

    let field = state.field();
    state.entities.advance(dt, input.steer, field);

    let entities = &mut state.entities;
    let report = resolve(
        &mut entities.obstacles,
        &mut entities.projectiles,
        &mut entities.craft,
    );
    events.extend(report.kills.iter().map(|_| GameEvent::Explosion));
    if report.life_lost {
        events.push(GameEvent::Explosion);
        log::debug!(
            "Craft struck by {} obstacle(s), {} lives left",
            report.hits.len(),
            state.entities.craft.lives
        );
    }
    state.session.score += report.destroyed();

    let params = state.difficulty.apply(state.session.score);
    if params.level > state.session.level {
        log::debug!(
            "Level {} (speed {:.0}, interval {:.2}s)",
            params.level,
            params.obstacle_speed,
            params.spawn_interval
        );
        events.push(GameEvent::LevelUp(params.level));
    }
    state.session.apply(params);
    state.spawner.set_interval(params.spawn_interval);

    if state.entities.craft.is_destroyed() {
        game_over(state, events);
    }
}

fn game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    let score = state.session.score;
    if state.high_score.record(score) {
        events.push(GameEvent::NewHighScore(score));
    }
    log::info!("Game over: score {}, best {}", score, state.high_score.best());
    events.push(GameEvent::GameOver {
        score,
        high_score: state.high_score.best(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), 0);
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &start, SIM_DT);
        assert_eq!(outcome.events, vec![GameEvent::SessionStarted]);
        state
    }

    /// Drop an obstacle right on top of the craft
    fn ram_craft(state: &mut GameState) {
        let id = state.next_entity_id();
        let pos = state.entities.craft.pos;
        state
            .entities
            .obstacles
            .push(Obstacle::new(id, pos, Vec2::ZERO, Vec2::splat(40.0)));
    }

    #[test]
    fn test_start_screen_waits_for_start() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        for _ in 0..120 {
            let outcome = tick(&mut state, &TickInput::default(), SIM_DT);
            assert!(outcome.events.is_empty());
        }
        assert_eq!(state.phase, GamePhase::StartScreen);
        assert!(state.entities.obstacles.is_empty());

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fire_spawns_one_projectile() {
        let mut state = playing(1);
        let fire = TickInput {
            fire: 1,
            ..Default::default()
        };
        let outcome = tick(&mut state, &fire, SIM_DT);
        assert_eq!(outcome.events, vec![GameEvent::Fire]);
        assert_eq!(state.entities.projectiles.len(), 1);
    }

    #[test]
    fn test_each_queued_press_fires() {
        let mut state = playing(1);
        let fire = TickInput {
            fire: 3,
            ..Default::default()
        };
        let outcome = tick(&mut state, &fire, SIM_DT);
        assert_eq!(outcome.events, vec![GameEvent::Fire; 3]);
        assert_eq!(state.entities.projectiles.len(), 3);
    }

    #[test]
    fn test_obstacles_spawn_over_time() {
        let mut state = playing(1);
        for _ in 0..61 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.entities.obstacles.len(), 1);
        assert_eq!(state.entities.obstacles[0].vel.x, state.session.obstacle_speed);
    }

    #[test]
    fn test_craft_collision_scores_and_costs_life() {
        let mut state = playing(1);
        ram_craft(&mut state);
        let outcome = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.session.score, 1);
        assert_eq!(state.entities.craft.lives, 2);
        assert_eq!(outcome.events, vec![GameEvent::Explosion]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_level_up_adjusts_spawner() {
        let mut state = playing(1);
        state.session.score = 9;
        ram_craft(&mut state);
        let outcome = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(outcome.events.contains(&GameEvent::LevelUp(2)));
        assert_eq!(state.session.level, 2);
        assert!((state.spawner.interval() - 0.9).abs() < 1e-6);
        assert_eq!(state.session.obstacle_speed, 300.0);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut state = playing(1);
        state.entities.craft.lives = 1;
        state.session.score = 4;
        ram_craft(&mut state);
        let outcome = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(outcome.events.contains(&GameEvent::NewHighScore(5)));
        assert!(outcome.events.contains(&GameEvent::GameOver {
            score: 5,
            high_score: 5
        }));

        // Frozen until restart
        let frozen_obstacles = state.entities.obstacles.len();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.entities.obstacles.len(), frozen_obstacles);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &restart, SIM_DT);
        assert_eq!(outcome.events, vec![GameEvent::SessionStarted]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.entities.craft.lives, 3);
        assert_eq!(state.high_score.best(), 5);
    }

    #[test]
    fn test_quit_records_high_score() {
        let mut state = playing(1);
        // Below the first level threshold, so no LevelUp on this tick
        state.session.score = 9;
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &quit, SIM_DT);
        assert!(outcome.quit);
        assert_eq!(outcome.events, vec![GameEvent::NewHighScore(9)]);
        assert_eq!(state.high_score.best(), 9);
    }

    #[test]
    fn test_quit_from_start_screen() {
        let mut state = GameState::new(1, Tuning::default(), 3);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &quit, SIM_DT);
        assert!(outcome.quit);
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_held_only_keeps_steering() {
        let input = TickInput {
            steer: Steering {
                up: true,
                ..Default::default()
            },
            fire: 2,
            quit: true,
            ..Default::default()
        };
        let held = input.held_only();
        assert!(held.steer.up);
        assert_eq!(held.fire, 0);
        assert!(!held.quit);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);

        let inputs = [
            TickInput {
                fire: 1,
                ..Default::default()
            },
            TickInput {
                steer: Steering {
                    up: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.session, state2.session);
        assert_eq!(state1.entities.obstacles.len(), state2.entities.obstacles.len());
        for (a, b) in state1.entities.obstacles.iter().zip(&state2.entities.obstacles) {
            assert_eq!(a.pos, b.pos);
        }
    }
}
