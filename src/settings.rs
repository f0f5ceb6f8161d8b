//! Game settings and preferences
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,
    /// RNG seed; a fresh one is drawn per process when absent
    pub seed: Option<u64>,
    /// Where the best score is kept
    pub high_score_path: PathBuf,
    /// Frame pacing target
    pub target_fps: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0). The terminal bell has no level: 0 silences
    /// it, anything higher rings it.
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0), gated the same way
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            seed: None,
            high_score_path: PathBuf::from("high_score.txt"),
            target_fps: 60,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings: Settings = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(value: f32, field: &'static str) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn unit(value: f32, field: &'static str) -> Result<(), SettingsError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be between 0 and 1",
                })
            }
        }

        let t = &self.tuning;
        positive(t.field.width, "tuning.field.width")?;
        positive(t.field.height, "tuning.field.height")?;
        positive(t.craft.width, "tuning.craft.width")?;
        positive(t.craft.height, "tuning.craft.height")?;
        positive(t.craft.speed, "tuning.craft.speed")?;
        positive(t.obstacle.width, "tuning.obstacle.width")?;
        positive(t.obstacle.height, "tuning.obstacle.height")?;
        positive(t.projectile.width, "tuning.projectile.width")?;
        positive(t.projectile.height, "tuning.projectile.height")?;
        positive(t.projectile.speed, "tuning.projectile.speed")?;
        positive(t.difficulty.base_speed, "tuning.difficulty.base_speed")?;
        positive(t.difficulty.base_interval, "tuning.difficulty.base_interval")?;
        positive(t.difficulty.min_interval, "tuning.difficulty.min_interval")?;
        if !(t.difficulty.max_speed >= t.difficulty.base_speed) {
            return Err(SettingsError::Invalid {
                field: "tuning.difficulty.max_speed",
                reason: "must not be below base_speed",
            });
        }
        if t.craft.lives == 0 {
            return Err(SettingsError::Invalid {
                field: "tuning.craft.lives",
                reason: "must be at least 1",
            });
        }
        if t.difficulty.points_per_level == 0 {
            return Err(SettingsError::Invalid {
                field: "tuning.difficulty.points_per_level",
                reason: "must be at least 1",
            });
        }
        if !(t.difficulty.speed_step >= 0.0 && t.difficulty.interval_step >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "tuning.difficulty",
                reason: "steps must not ease difficulty",
            });
        }
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid {
                field: "target_fps",
                reason: "must be at least 1",
            });
        }
        unit(self.master_volume, "master_volume")?;
        unit(self.sfx_volume, "sfx_volume")?;
        Ok(())
    }
}
