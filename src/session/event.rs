//! Input events consumed by a session and the notices it emits.

use serde::{Deserialize, Serialize};

use crate::questions::Verdict;
use crate::round::ScheduledTransition;

/// A discrete input from the presentation layer or the host timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Start, or restart after the session ended.
    Start,
    /// Check a typed spelling.
    SubmitAnswer(String),
    /// Show the root hint for this round.
    RequestHint,
    /// Give up and show the answer.
    RevealAnswer,
    /// Drop a bank tile into the construction zone.
    AssemblePart(String),
    /// Take a placed tile back out.
    RemovePart(String),
    /// Replace the current question immediately.
    Skip,
    /// One second of countdown.
    Tick,
    /// A previously scheduled transition has come due.
    TransitionElapsed(ScheduledTransition),
}

/// Something the presentation layer should reflect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameNotice {
    /// A new round began.
    NewQuestion { generation: u64, definition: String },
    /// A spelling was checked.
    Answered { verdict: Verdict, points: u32, score: u32 },
    /// Root hint text. `repeated` is true for requests after the first.
    Hint { text: String, repeated: bool },
    /// The answer was revealed with its full breakdown.
    Revealed { answer: String, breakdown: String },
    /// A tile was placed or removed. `gate_changed` is set when the change
    /// opened or closed the spelling input.
    Assembly {
        assembled: Vec<String>,
        spelling_open: bool,
        gate_changed: bool,
    },
    /// The host must deliver this transition after its delay.
    Schedule(ScheduledTransition),
    /// Countdown moved.
    Countdown { remaining: u32 },
    /// The countdown reached zero; the session is over.
    SessionOver { final_score: u32, high_score: u32, new_high_score: bool },
}
