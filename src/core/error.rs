//! Engine error types.
//!
//! Every failure the engine can report is a data or configuration defect.
//! Player mistakes (empty submissions, repeated hints) are never errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by loading, configuration and question generation.
#[derive(Debug, Error)]
pub enum GameError {
    /// The game data document could not be read.
    #[error("could not read game data from {}: {source}", .path.display())]
    DataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The game data document is not valid JSON of the expected shape.
    #[error("could not parse game data: {0}")]
    DataParse(#[from] serde_json::Error),

    /// The document parsed but its contents are unusable.
    #[error("invalid game data: {0}")]
    InvalidData(String),

    /// Derived mode needs at least one root with example words.
    #[error("no root entry has example words to build a question from")]
    NoEligibleRoot,

    /// Curated mode needs at least one authored question.
    #[error("curated mode selected but the game data has no questions")]
    NoCuratedQuestions,

    /// The database cannot fill a distractor bank of the configured size.
    #[error("cannot build a bank of {needed} distinct morphemes (only {available} available)")]
    InsufficientData { needed: usize, available: usize },

    /// Reading or writing the persisted high score failed.
    #[error("high score store error: {0}")]
    HighScore(String),

    /// The configuration file is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GameError {
    /// Returns `true` if the game cannot continue after this error.
    ///
    /// A failing high score store only loses persistence; play goes on.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GameError::HighScore(_))
    }

    /// Returns `true` if this error comes from loading the data document.
    pub fn is_data_load(&self) -> bool {
        matches!(
            self,
            GameError::DataRead { .. } | GameError::DataParse(_) | GameError::InvalidData(_)
        )
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GameError>;
