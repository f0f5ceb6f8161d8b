//! High score storage
//!
//! Features:
//! - Plain-text integer file
//! - Atomic replace (write tmp, then rename over the save)
//! - Missing or corrupt files read back as 0

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to write high score to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Durable storage for a single best score
pub trait ScoreStore {
    /// Stored score, or 0 if absent or unreadable
    fn load(&self) -> u64;

    /// Overwrite the stored score
    fn save(&mut self, score: u64) -> Result<(), PersistenceError>;
}

/// Best score kept in a text file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u64 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("Could not read high score {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match text.trim().parse::<u64>() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(_) => {
                log::warn!("Ignoring unparseable high score file {}", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), PersistenceError> {
        let tmp = self.tmp_path();
        fs::write(&tmp, score.to_string()).map_err(|source| PersistenceError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store, for tests and headless runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    pub score: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryScoreStore {
    pub fn with_score(score: u64) -> Self {
        Self {
            score: Some(score),
            saves: 0,
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.score.unwrap_or(0)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.score = Some(score);
        self.saves += 1;
        Ok(())
    }
}
