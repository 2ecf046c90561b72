//! # word-architect
//!
//! Engine for a morpheme word-building game: the player reads a definition
//! and builds the target word from prefix, root and suffix tiles.
//!
//! ## Design Principles
//!
//! 1. **No ambient state**: a `Session` owns the data, the round, score and
//!    countdown. Every change is an explicit event.
//!
//! 2. **Presentation-agnostic**: input arrives as `GameEvent`s, output leaves
//!    as `GameNotice`s and `SessionSnapshot`s. No rendering, no sleeping.
//!
//! 3. **Deterministic**: all randomness flows through a seeded `GameRng`,
//!    and delayed transitions carry the generation of the round they belong
//!    to, so stale ones are dropped.
//!
//! ## Modules
//!
//! - `core`: configuration, errors, RNG
//! - `morphemes`: morpheme entries, the database, lookup
//! - `questions`: question records, generation, answer and hint evaluation
//! - `round`: the per-question state machine and delayed transitions
//! - `session`: event dispatch, countdown, score and high score

pub mod core;
pub mod morphemes;
pub mod questions;
pub mod round;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameError, GameRng, GenerationMode, Result, SpellingGate};

pub use crate::morphemes::{
    Category, GameData, MorphemeDatabase, MorphemeEntry, MorphemeLookup, Resolved,
};

pub use crate::questions::{
    build_breakdown, build_hint, check_answer, CuratedQuestion, Question, QuestionGenerator,
    Verdict,
};

pub use crate::round::{Round, RoundPhase, RoundStatus, ScheduledTransition, Scheduler, TransitionKind};

pub use crate::session::{
    GameEvent, GameNotice, HighScoreStore, JsonFileHighScore, MemoryHighScore, Session,
    SessionSnapshot, SessionStatus,
};
