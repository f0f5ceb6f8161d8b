//! Keyboard input
//!
//! Directions are level-sensitive: a key counts as held if its last press or
//! repeat arrived within `HOLD_WINDOW` frames, or until its release event on
//! terminals that report releases. Fire/start/restart/quit fire once per
//! press; key repeats never re-trigger them.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Steering, TickInput};

/// Frames a key stays held without a fresh press/repeat event.
/// 8 frames @ 60 fps ≈ 133 ms, shorter than a typical OS repeat interval
/// once repeating has started.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Fire,
    Confirm,
    Restart,
    Quit,
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn command_for(key: &KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::Fire),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Turns raw terminal events into per-frame `TickInput`
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Direction key -> frame it was last seen (press or repeat)
    held: HashMap<KeyCode, u64>,
    /// One-shot commands seen since the last frame
    pending: TickInput,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event
    pub fn handle(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };

        match key.kind {
            KeyEventKind::Press => {
                if direction_for(key.code).is_some() {
                    self.held.insert(key.code, self.frame);
                }
                match command_for(key) {
                    Some(Command::Fire) => self.pending.fire = self.pending.fire.saturating_add(1),
                    Some(Command::Confirm) => {
                        self.pending.start = true;
                        self.pending.restart = true;
                    }
                    Some(Command::Restart) => self.pending.restart = true,
                    Some(Command::Quit) => self.pending.quit = true,
                    None => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                if direction_for(key.code).is_some() {
                    self.held.insert(key.code, self.frame);
                }
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.held.remove(&key.code);
            }
        }
    }

    /// Collect this frame's input and move on to the next frame
    pub fn frame_input(&mut self) -> TickInput {
        let frame = self.frame;
        self.held
            .retain(|_, &mut last| frame.saturating_sub(last) <= HOLD_WINDOW);

        let mut steer = Steering::default();
        for code in self.held.keys() {
            match direction_for(*code) {
                Some(Direction::Up) => steer.up = true,
                Some(Direction::Down) => steer.down = true,
                Some(Direction::Left) => steer.left = true,
                Some(Direction::Right) => steer.right = true,
                None => {}
            }
        }

        let mut input = std::mem::take(&mut self.pending);
        input.steer = steer;
        self.frame += 1;
        input
    }
}
