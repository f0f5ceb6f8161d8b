//! Audio triggers
//!
//! The simulation only emits parameterless triggers. The terminal build
//! answers explosions with the terminal bell; nothing else needs files.

use std::io::Write;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Laser fired
    Fire,
    /// Obstacle destroyed or craft struck
    Explosion,
}

impl SoundEffect {
    /// Map a simulation event to the sound it triggers, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Fire => Some(SoundEffect::Fire),
            GameEvent::Explosion => Some(SoundEffect::Explosion),
            _ => None,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every sound
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio manager for the game
pub struct AudioManager<W: Write> {
    out: W,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<W: Write> AudioManager<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(out: W, settings: &Settings) -> Self {
        let mut audio = Self::new(out);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Combined volume; the bell only distinguishes zero from non-zero
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for AudioManager<W> {
    fn play(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        match effect {
            // A bell per shot drowns out everything else
            SoundEffect::Fire => {}
            SoundEffect::Explosion => {
                if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
                    log::warn!("Failed to ring bell: {}", e);
                }
            }
        }
    }
}
