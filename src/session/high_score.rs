//! Persisted high score.
//!
//! A single named integer, read when a session is created (0 if absent)
//! and written only when a finished session's score strictly exceeds it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::error::{GameError, Result};

/// Name the high score is stored under.
pub const HIGH_SCORE_KEY: &str = "wordArchitectHighScore";

/// Storage for the high score.
pub trait HighScoreStore {
    /// Read the stored high score, 0 if none was ever written.
    fn load(&self) -> Result<u32>;

    /// Overwrite the stored high score.
    fn save(&mut self, score: u32) -> Result<()>;
}

/// High score kept in memory for the lifetime of the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryHighScore {
    value: Option<u32>,
}

impl MemoryHighScore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Result<u32> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = Some(score);
        Ok(())
    }
}

/// High score in a small JSON object file, `{"wordArchitectHighScore": 40}`.
///
/// Other keys in the file are preserved.
#[derive(Clone, Debug)]
pub struct JsonFileHighScore {
    path: PathBuf,
    key: String,
}

impl JsonFileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: HIGH_SCORE_KEY.to_string(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| GameError::HighScore(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(GameError::HighScore(format!("{}: {e}", self.path.display()))),
        }
    }
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> Result<u32> {
        Ok(self.read_all()?.get(&self.key).copied().unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(self.key.clone(), score);
        let text = serde_json::to_string_pretty(&all)
            .map_err(|e| GameError::HighScore(e.to_string()))?;
        std::fs::write(&self.path, text)
            .map_err(|e| GameError::HighScore(format!("{}: {e}", self.path.display())))
    }
}
