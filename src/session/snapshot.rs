//! Render-ready views of a session.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::morphemes::MorphemeLookup;
use crate::questions::{bank_glossary, build_breakdown, BankItem};
use crate::round::{Round, RoundPhase, RoundStatus};

/// Session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Created, waiting for `Start`.
    Ready,
    /// Rounds are being played.
    Playing,
    /// The countdown expired.
    Over,
}

/// Everything a view needs to draw the current round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub generation: u64,
    pub definition: String,
    /// Bank tiles with meanings where the database lists them.
    pub bank: Vec<BankItem>,
    pub assembled: Vector<String>,
    pub required_parts: usize,
    pub phase: RoundPhase,
    pub spelling_open: bool,
    pub hint: Option<String>,
    pub can_reveal: bool,
    /// Only filled once the answer has been revealed.
    pub answer: Option<String>,
    pub breakdown: Option<String>,
}

impl RoundSnapshot {
    pub(crate) fn capture(round: &Round, lookup: &MorphemeLookup<'_>, can_reveal: bool) -> Self {
        let question = round.question();
        let revealed = round.status() == RoundStatus::Revealed;
        Self {
            generation: round.generation(),
            definition: question.definition.clone(),
            bank: bank_glossary(question, lookup),
            assembled: round.assembled().clone(),
            required_parts: question.required_parts(),
            phase: round.phase(),
            spelling_open: round.spelling_open(),
            hint: round.hint().map(str::to_string),
            can_reveal,
            answer: revealed.then(|| question.answer.clone()),
            breakdown: revealed.then(|| build_breakdown(question, lookup)),
        }
    }
}

/// Session-wide view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub score: u32,
    pub high_score: u32,
    /// `None` when the countdown is disabled.
    pub remaining_seconds: Option<u32>,
    pub round: Option<RoundSnapshot>,
}
