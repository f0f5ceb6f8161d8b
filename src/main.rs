//! Asteroid Field entry point
//!
//! Sets up the terminal and runs the game loop.

use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal,
};

use asteroid_field::audio::{AudioManager, AudioSink};
use asteroid_field::persistence::{FileScoreStore, ScoreStore};
use asteroid_field::platform::{FramePacer, KeyTracker};
use asteroid_field::renderer::{FrameView, Renderer, TerminalRenderer, Viewport};
use asteroid_field::{App, FrameResult, Settings};

const CONFIG_ENV: &str = "ASTEROID_FIELD_CONFIG";
const DEFAULT_CONFIG: &str = "asteroid_field.json";

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run<W, S, A>(app: &mut App<S, A>, renderer: &mut TerminalRenderer<W>, target_fps: u32) -> Result<()>
where
    W: Write,
    S: ScoreStore,
    A: AudioSink,
{
    let mut keys = KeyTracker::new();
    let mut pacer = FramePacer::new(target_fps);

    loop {
        let dt = pacer.begin();

        // Drain everything the terminal has queued without blocking
        while event::poll(Duration::ZERO).context("polling terminal events")? {
            let ev = event::read().context("reading terminal event")?;
            if let Event::Resize(cols, rows) = ev {
                renderer.resize(cols, rows);
            }
            keys.handle(&ev);
        }

        let result = app.update(dt, &keys.frame_input());

        renderer
            .render(&FrameView::from_state(app.state()))
            .context("drawing frame")?;

        if result == FrameResult::Quit {
            return Ok(());
        }
        pacer.wait();
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let settings = Settings::load(&config).with_context(|| format!("loading settings from {}", config.display()))?;

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let store = FileScoreStore::new(settings.high_score_path.clone());
    let audio = AudioManager::from_settings(stdout(), &settings);
    let mut app = App::new(&settings, seed, store, audio);

    let (cols, rows) = terminal::size().context("querying terminal size")?;
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    let setup = out
        .execute(terminal::EnterAlternateScreen)
        .and_then(|out| out.execute(cursor::Hide))
        .map(|_| ());

    // Key release events where the terminal supports them; others fall back
    // to the hold window
    let keyboard_enhanced = setup.is_ok()
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    let mut renderer = TerminalRenderer::new(out, Viewport::new(cols, rows));
    let result = setup
        .context("preparing terminal")
        .and_then(|_| run(&mut app, &mut renderer, settings.target_fps));

    // Always restore the terminal
    let mut out = renderer.into_inner();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Exiting with high score {}", app.state().high_score.best());
    result
}
