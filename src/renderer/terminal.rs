//! Terminal renderer
//!
//! Draws a frame with crossterm. Field coordinates are scaled onto the
//! terminal grid inside a border:
//!
//! - row 0: HUD
//! - row 1 / row h-3..: border
//! - last row: controls hint

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use super::{FrameView, Renderer};
use crate::consts::SIM_DT;
use crate::sim::{Aabb, GamePhase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_CRAFT: Color = Color::White;
const C_OBSTACLE: Color = Color::DarkYellow;
const C_PROJECTILE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Start-screen prompt blink period (seconds)
const BLINK_INTERVAL: f32 = 0.5;

/// Obstacle glyphs, one per quarter turn
const OBSTACLE_GLYPHS: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Terminal grid and the mapping from field space onto it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Width of the play area in cells
    fn inner_cols(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    /// Height of the play area in cells
    fn inner_rows(&self) -> u16 {
        self.rows.saturating_sub(4)
    }

    pub fn has_play_area(&self) -> bool {
        self.inner_cols() > 0 && self.inner_rows() > 0
    }

    /// Cell holding a field-space point, clamped into the play area
    pub fn cell(&self, pos: Vec2, field: Vec2) -> (u16, u16) {
        let scale = |v: f32, extent: f32, cells: u16| -> u16 {
            if cells == 0 || !(extent > 0.0) {
                return 0;
            }
            let t = (v / extent).clamp(0.0, 1.0);
            ((t * cells as f32) as u16).min(cells - 1)
        };
        (
            1 + scale(pos.x, field.x, self.inner_cols()),
            2 + scale(pos.y, field.y, self.inner_rows()),
        )
    }

    /// Inclusive cell rectangle covered by a footprint (at least one cell)
    pub fn cell_rect(&self, bounds: &Aabb, field: Vec2) -> (u16, u16, u16, u16) {
        let (c0, r0) = self.cell(bounds.min, field);
        let (c1, r1) = self.cell(bounds.max - Vec2::splat(1e-3), field);
        (c0, r0, c1.max(c0), r1.max(r0))
    }
}

pub fn obstacle_glyph(rotation: f32) -> char {
    let quarter = (rotation / 90.0) as usize % OBSTACLE_GLYPHS.len();
    OBSTACLE_GLYPHS[quarter]
}

/// Whether the start-screen prompt is visible on this tick
pub fn blink_on(time_ticks: u64) -> bool {
    let periods = (time_ticks as f32 * SIM_DT / BLINK_INTERVAL) as u64;
    periods % 2 == 0
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self { out, viewport }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::new(cols, rows);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn centered(&mut self, row: u16, text: &str, color: Color) -> io::Result<()> {
        let col = (self.viewport.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    // ── Border ────────────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> io::Result<()> {
        let Viewport { cols, rows } = self.viewport;
        let w = cols as usize;
        let out = &mut self.out;

        out.queue(style::SetForegroundColor(C_BORDER))?;

        out.queue(cursor::MoveTo(0, 1))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
        out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..rows.saturating_sub(2) {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print("│"))?;
            out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
            out.queue(Print("│"))?;
        }
        Ok(())
    }

    // ── HUD (row 0) ───────────────────────────────────────────────────────────

    fn draw_hud(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        let out = &mut self.out;
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD))?;
        out.queue(Print(format!(
            "Score: {}  High Score: {}  Level: {}",
            frame.session.score, frame.high_score, frame.session.level
        )))?;

        let lives = format!("Lives: {}", frame.entities.craft.lives);
        let col = self.viewport.cols.saturating_sub(lives.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        out.queue(Print(lives))?;
        Ok(())
    }

    // ── Entities ──────────────────────────────────────────────────────────────

    fn fill(&mut self, bounds: &Aabb, field: Vec2, glyph: impl Fn(u16, u16) -> char) -> io::Result<()> {
        let (c0, r0, c1, r1) = self.viewport.cell_rect(bounds, field);
        for row in r0..=r1 {
            let line: String = (c0..=c1).map(|col| glyph(col - c0, row - r0)).collect();
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(line))?;
        }
        Ok(())
    }

    fn draw_entities(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        if !self.viewport.has_play_area() {
            return Ok(());
        }
        let field = frame.field;

        self.out.queue(style::SetForegroundColor(C_OBSTACLE))?;
        for obstacle in &frame.entities.obstacles {
            let glyph = obstacle_glyph(obstacle.rotation());
            self.fill(&obstacle.bounds(), field, |_, _| glyph)?;
        }

        self.out.queue(style::SetForegroundColor(C_PROJECTILE))?;
        for projectile in &frame.entities.projectiles {
            self.fill(&projectile.bounds(), field, |_, _| '─')?;
        }

        // Nose faces the incoming obstacles
        self.out.queue(style::SetForegroundColor(C_CRAFT))?;
        self.fill(&frame.entities.craft.bounds(), field, |col, _| {
            if col == 0 { '◄' } else { '█' }
        })?;
        Ok(())
    }

    // ── Screens ───────────────────────────────────────────────────────────────

    fn draw_start_screen(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        let rows = self.viewport.rows;
        self.centered(rows / 4, "ASTEROID FIELD", Color::Cyan)?;
        if frame.high_score > 0 {
            let best = format!("High Score: {}", frame.high_score);
            self.centered(rows / 4 + 2, &best, C_HUD)?;
        }
        if blink_on(frame.time_ticks) {
            self.centered(rows / 2, "Press Enter to Start", Color::White)?;
        }
        Ok(())
    }

    fn draw_game_over(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        let rows = self.viewport.rows;
        let score = format!("Score: {}", frame.session.score);
        let best = format!("High Score: {}", frame.high_score);
        self.centered(rows / 4, "GAME OVER", Color::Red)?;
        self.centered((rows / 2).saturating_sub(1), &score, C_HUD)?;
        self.centered(rows / 2, &best, C_HUD)?;
        self.centered(rows * 3 / 4, "Press Enter to Restart", Color::White)?;
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> io::Result<()> {
        let out = &mut self.out;
        out.queue(cursor::MoveTo(1, self.viewport.rows.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("Arrows / WASD : Move   SPACE : Fire   Q : Quit"))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = io::Error;

    /// Render one complete frame.
    fn render(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        match frame.phase {
            GamePhase::StartScreen => self.draw_start_screen(frame)?,
            GamePhase::Playing | GamePhase::GameOver => {
                self.draw_border()?;
                self.draw_hud(frame)?;
                self.draw_entities(frame)?;
                if frame.phase == GamePhase::GameOver {
                    self.draw_game_over(frame)?;
                }
            }
        }
        self.draw_controls_hint()?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
