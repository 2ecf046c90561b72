//! Game configuration.
//!
//! Hosts pick a variant by building a `GameConfig`:
//! - `GameConfig::timed_challenge()`: curated questions, typed answers,
//!   3-minute countdown, 10 points per correct word
//! - `GameConfig::construction()`: derived questions, parts assembled from
//!   the bank before spelling, no countdown
//!
//! Configs can also be read from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Where questions come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Pick an authored `{definition, parts, answer}` record.
    Curated,
    /// Decompose an example word of a random root.
    Derived,
}

/// When the spelling input becomes available during a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingGate {
    /// Spelling is always available (typed variant).
    Always,
    /// Available once any part has been placed.
    AtLeastOnePart,
    /// Available once as many parts are placed as the answer has.
    AllParts,
}

impl SpellingGate {
    /// Whether spelling is open with `assembled` parts placed out of `required`.
    #[must_use]
    pub fn is_open(self, assembled: usize, required: usize) -> bool {
        match self {
            SpellingGate::Always => true,
            SpellingGate::AtLeastOnePart => assembled >= 1,
            SpellingGate::AllParts => assembled == required,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Question source.
    pub mode: GenerationMode,

    /// Spelling input gate.
    pub spelling_gate: SpellingGate,

    /// Number of distinct morphemes shown in the bank.
    pub bank_size: usize,

    /// Upper bound on random draws while filling the bank.
    pub max_attempts: usize,

    /// Session countdown in seconds. `None` disables the timer.
    pub timer_seconds: Option<u32>,

    /// Delay before the next question after a correct answer.
    pub advance_delay_ms: u64,

    /// Delay before the next question after revealing the answer.
    pub reveal_delay_ms: u64,

    /// Score awarded per correct answer.
    pub points_per_correct: u32,

    /// Only allow revealing the answer once a hint has been shown.
    pub reveal_requires_hint: bool,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::timed_challenge()
    }
}

impl GameConfig {
    /// Typed answers against curated questions under a 180 s countdown.
    #[must_use]
    pub fn timed_challenge() -> Self {
        Self {
            mode: GenerationMode::Curated,
            spelling_gate: SpellingGate::Always,
            bank_size: 8,
            max_attempts: 1000,
            timer_seconds: Some(180),
            advance_delay_ms: 800,
            reveal_delay_ms: 3000,
            points_per_correct: 10,
            reveal_requires_hint: true,
            seed: None,
        }
    }

    /// Assemble derived parts from the bank, then spell. Untimed.
    #[must_use]
    pub fn construction() -> Self {
        Self {
            mode: GenerationMode::Derived,
            spelling_gate: SpellingGate::AllParts,
            timer_seconds: None,
            advance_delay_ms: 2000,
            reveal_requires_hint: false,
            ..Self::timed_challenge()
        }
    }

    /// Read a TOML config file. Missing keys take `timed_challenge` values.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Parse a TOML config string.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.bank_size == 0 {
            return Err(GameError::Config("bank_size must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(GameError::Config("max_attempts must be at least 1".into()));
        }
        if self.timer_seconds == Some(0) {
            return Err(GameError::Config("timer_seconds must be positive".into()));
        }
        Ok(())
    }

    /// Set the generation mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the spelling gate.
    #[must_use]
    pub fn with_spelling_gate(mut self, gate: SpellingGate) -> Self {
        self.spelling_gate = gate;
        self
    }

    /// Set the bank size.
    #[must_use]
    pub fn with_bank_size(mut self, size: usize) -> Self {
        self.bank_size = size;
        self
    }

    /// Set or disable the countdown.
    #[must_use]
    pub fn with_timer(mut self, seconds: Option<u32>) -> Self {
        self.timer_seconds = seconds;
        self
    }

    /// Set a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
