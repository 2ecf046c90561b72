//! Game sessions: event dispatch, score, countdown and high score.
//!
//! ## Key Types
//!
//! - `Session`: owns the data and the current round; consumes `GameEvent`s
//!   and returns `GameNotice`s
//! - `Countdown`: the timed variant's clock
//! - `HighScoreStore`: persistence for the best score
//! - `SessionSnapshot`: render-ready state

pub mod event;
pub mod game;
pub mod high_score;
pub mod snapshot;
pub mod timer;

pub use event::{GameEvent, GameNotice};
pub use game::Session;
pub use high_score::{HighScoreStore, JsonFileHighScore, MemoryHighScore, HIGH_SCORE_KEY};
pub use snapshot::{RoundSnapshot, SessionSnapshot, SessionStatus};
pub use timer::{format_clock, Countdown, TickOutcome};
