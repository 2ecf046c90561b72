//! Per-question round state and its transitions.
//!
//! ## Lifecycle
//!
//! ```text
//! Building --submit--> (check) --Incorrect--> Building
//!                              --Correct----> Advancing  (terminal)
//! Building --reveal--> Revealed                          (terminal)
//! ```
//!
//! Assembling and removing parts are `Building` self-loops that open or
//! close the spelling input according to the `SpellingGate`. Terminal rounds
//! ignore all input; the session replaces them with a fresh `Round`.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::config::SpellingGate;
use crate::questions::{check_answer, Question, Verdict};

/// Resolution status of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    InProgress,
    Correct,
    Revealed,
}

/// Phase as seen by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Bank populated; the player assembles parts and/or types.
    Building,
    /// Answered correctly; waiting for the advance delay.
    Advancing,
    /// Answer shown; input disabled until the reveal delay passes.
    Revealed,
}

impl From<RoundStatus> for RoundPhase {
    fn from(status: RoundStatus) -> Self {
        match status {
            RoundStatus::InProgress => RoundPhase::Building,
            RoundStatus::Correct => RoundPhase::Advancing,
            RoundStatus::Revealed => RoundPhase::Revealed,
        }
    }
}

/// Effect of placing or removing a part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssemblyChange {
    /// Whether spelling is available after the change.
    pub spelling_open: bool,
    /// Whether the change flipped spelling availability.
    pub gate_changed: bool,
}

/// One definition-to-answer cycle.
#[derive(Clone, Debug)]
pub struct Round {
    generation: u64,
    question: Question,
    gate: SpellingGate,
    assembled: Vector<String>,
    hint: Option<String>,
    status: RoundStatus,
    attempts: u32,
}

impl Round {
    /// Start a round in `Building` with nothing assembled.
    #[must_use]
    pub fn new(generation: u64, question: Question, gate: SpellingGate) -> Self {
        Self {
            generation,
            question,
            gate,
            assembled: Vector::new(),
            hint: None,
            status: RoundStatus::InProgress,
            attempts: 0,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.status.into()
    }

    /// Parts placed so far, in placement order.
    #[must_use]
    pub fn assembled(&self) -> &Vector<String> {
        &self.assembled
    }

    #[must_use]
    pub fn hint_revealed(&self) -> bool {
        self.hint.is_some()
    }

    /// The hint text, once revealed.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Incorrect submissions so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status != RoundStatus::InProgress
    }

    /// Whether a submission would currently be checked.
    #[must_use]
    pub fn spelling_open(&self) -> bool {
        !self.is_resolved()
            && self
                .gate
                .is_open(self.assembled.len(), self.question.required_parts())
    }

    /// Place a bank tile at the end of the construction.
    ///
    /// `None` if the round is resolved or `part` is not in the bank.
    pub fn assemble(&mut self, part: &str) -> Option<AssemblyChange> {
        if self.is_resolved() || !self.question.bank_contains(part) {
            return None;
        }
        let was_open = self.spelling_open();
        self.assembled.push_back(part.to_string());
        Some(self.change_since(was_open))
    }

    /// Remove the most recent placement of `part`.
    ///
    /// `None` if the round is resolved or `part` was never placed.
    pub fn remove(&mut self, part: &str) -> Option<AssemblyChange> {
        if self.is_resolved() {
            return None;
        }
        let index = self.assembled.iter().rposition(|p| p == part)?;
        let was_open = self.spelling_open();
        self.assembled.remove(index);
        Some(self.change_since(was_open))
    }

    fn change_since(&self, was_open: bool) -> AssemblyChange {
        let spelling_open = self.spelling_open();
        AssemblyChange {
            spelling_open,
            gate_changed: spelling_open != was_open,
        }
    }

    /// Check a spelling.
    ///
    /// `None` means nothing happened: the round is resolved, spelling is not
    /// open yet, or the submission was blank.
    pub fn submit(&mut self, submitted: &str) -> Option<Verdict> {
        if !self.spelling_open() {
            return None;
        }
        let verdict = check_answer(submitted, &self.question)?;
        match verdict {
            Verdict::Correct => self.status = RoundStatus::Correct,
            Verdict::Incorrect => self.attempts += 1,
        }
        Some(verdict)
    }

    /// Record the hint text, once.
    ///
    /// Returns the hint and whether this call revealed it. Later calls return
    /// the text recorded first. `None` once the round is resolved.
    pub fn reveal_hint(&mut self, render: impl FnOnce(&Question) -> String) -> Option<(&str, bool)> {
        if self.is_resolved() {
            return None;
        }
        let first = self.hint.is_none();
        let question = &self.question;
        let text = self.hint.get_or_insert_with(|| render(question));
        Some((text.as_str(), first))
    }

    /// Give up on the round. `false` if it was already resolved.
    pub fn reveal_answer(&mut self) -> bool {
        if self.is_resolved() {
            return false;
        }
        self.status = RoundStatus::Revealed;
        true
    }
}
