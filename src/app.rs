//! Fixed-timestep driver
//!
//! Owns the simulation and its collaborators. Wall-clock frame time is fed
//! into an accumulator and drained in `SIM_DT` ticks; simulation events are
//! forwarded to audio and the score store.

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};
use crate::persistence::ScoreStore;
use crate::sanitize_dt;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, TickOutcome, tick};

/// Whether the outer loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    Continue,
    Quit,
}

pub struct App<S: ScoreStore, A: AudioSink> {
    state: GameState,
    store: S,
    audio: A,
    accumulator: f32,
    /// Edge-triggered commands waiting for the next tick
    pending: TickInput,
}

impl<S: ScoreStore, A: AudioSink> App<S, A> {
    /// Build the app on the start screen, seeded with the stored best score
    pub fn new(settings: &Settings, seed: u64, store: S, audio: A) -> Self {
        let high_score = store.load();
        log::info!("Starting with seed {} and high score {}", seed, high_score);
        Self {
            state: GameState::new(seed, settings.tuning, high_score),
            store,
            audio,
            accumulator: 0.0,
            pending: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Advance by `real_dt` seconds of wall-clock time.
    ///
    /// Edge-triggered commands are consumed by the first tick that runs;
    /// if no tick runs this frame they stay queued for the next one.
    pub fn update(&mut self, real_dt: f32, input: &TickInput) -> FrameResult {
        self.queue(input);

        let dt = sanitize_dt(real_dt).min(MAX_FRAME_DELTA);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.pending;
            let outcome = tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending = self.pending.held_only();

            if self.dispatch(outcome) == FrameResult::Quit {
                return FrameResult::Quit;
            }
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        FrameResult::Continue
    }

    /// Run exactly one tick with `input`, bypassing the accumulator
    pub fn step(&mut self, input: &TickInput) -> FrameResult {
        let outcome = tick(&mut self.state, input, SIM_DT);
        self.dispatch(outcome)
    }

    fn queue(&mut self, input: &TickInput) {
        let pending = &mut self.pending;
        pending.steer = input.steer;
        pending.fire = pending.fire.saturating_add(input.fire);
        pending.start |= input.start;
        pending.restart |= input.restart;
        pending.quit |= input.quit;
    }

    fn dispatch(&mut self, outcome: TickOutcome) -> FrameResult {
        for event in &outcome.events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
            if let GameEvent::NewHighScore(score) = event {
                if let Err(e) = self.store.save(*score) {
                    log::error!("Failed to save high score: {}", e);
                }
            }
        }

        if outcome.quit {
            FrameResult::Quit
        } else {
            FrameResult::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryScoreStore, PersistenceError};
    use crate::platform::KeyTracker;
    use crate::sim::GamePhase;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    /// Records every sound it is asked to play
    #[derive(Default)]
    struct RecordingAudio(Vec<SoundEffect>);

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> u64 {
            0
        }

        fn save(&mut self, _score: u64) -> Result<(), PersistenceError> {
            Err(PersistenceError::Write {
                path: "/dev/full".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn app() -> App<MemoryScoreStore, RecordingAudio> {
        App::new(
            &Settings::default(),
            1,
            MemoryScoreStore::with_score(10),
            RecordingAudio::default(),
        )
    }

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_loads_high_score() {
        let app = app();
        assert_eq!(app.state().high_score.best(), 10);
        assert_eq!(app.state().phase, GamePhase::StartScreen);
    }

    #[test]
    fn test_no_tick_until_a_full_step_accumulates() {
        let mut app = app();
        app.update(SIM_DT / 2.0, &start());
        assert_eq!(app.state().time_ticks, 0);
        // The queued start survives until a tick runs
        app.update(SIM_DT, &TickInput::default());
        assert_eq!(app.state().time_ticks, 1);
        assert_eq!(app.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut app = app();
        app.update(10.0, &TickInput::default());
        assert_eq!(app.state().time_ticks, MAX_SUBSTEPS as u64);
        // Backlog is dropped, not replayed next frame
        app.update(0.0, &TickInput::default());
        assert_eq!(app.state().time_ticks, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_fire_consumed_by_first_substep_only() {
        let mut app = app();
        app.step(&start());
        let fire = TickInput {
            fire: 1,
            ..Default::default()
        };
        app.update(SIM_DT * 3.5, &fire);
        assert_eq!(app.state().time_ticks, 4);
        assert_eq!(app.state().entities.projectiles.len(), 1);
        assert_eq!(app.audio().0, vec![SoundEffect::Fire]);
    }

    #[test]
    fn test_presses_carry_over_frames_without_a_tick() {
        let mut app = app();
        app.step(&start());
        let mut keys = KeyTracker::new();
        let space = Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));

        // Two presses land in a frame too short to tick
        keys.handle(&space);
        keys.handle(&space);
        app.update(SIM_DT * 0.5, &keys.frame_input());
        assert_eq!(app.state().time_ticks, 1);
        assert!(app.state().entities.projectiles.is_empty());

        app.update(SIM_DT * 0.6, &keys.frame_input());
        assert_eq!(app.state().time_ticks, 2);
        assert_eq!(app.state().entities.projectiles.len(), 2);

        // Two more presses within one ticking frame
        keys.handle(&space);
        keys.handle(&space);
        app.update(SIM_DT, &keys.frame_input());
        assert_eq!(app.state().time_ticks, 3);
        assert_eq!(app.state().entities.projectiles.len(), 4);
        assert_eq!(app.audio().0, vec![SoundEffect::Fire; 4]);
    }

    #[test]
    fn test_quit_stops_frame() {
        let mut app = app();
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(app.update(SIM_DT * 3.0, &quit), FrameResult::Quit);
        assert_eq!(app.state().time_ticks, 1);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let mut app = App::new(&Settings::default(), 1, BrokenStore, RecordingAudio::default());
        app.step(&start());
        app.state_mut().session.score = 3;
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(app.step(&quit), FrameResult::Quit);
        assert_eq!(app.state().high_score.best(), 3);
    }
}
