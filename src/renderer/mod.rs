//! Rendering module
//!
//! The simulation hands a read-only `FrameView` to a `Renderer` once per
//! frame. Positions are in field units; mapping to output space is the
//! renderer's business.

pub mod terminal;

use glam::Vec2;

use crate::sim::{EntityState, GamePhase, GameState, SessionState};

pub use terminal::{TerminalRenderer, Viewport};

/// Everything a frame needs, borrowed from the game state
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub entities: &'a EntityState,
    pub session: &'a SessionState,
    pub high_score: u64,
    pub time_ticks: u64,
    pub field: Vec2,
}

impl<'a> FrameView<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            entities: &state.entities,
            session: &state.session,
            high_score: state.high_score.best(),
            time_ticks: state.time_ticks,
            field: state.field(),
        }
    }
}

/// Consumes one frame of game state
pub trait Renderer {
    type Error;

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), Self::Error>;
}
