//! Question records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Parts of a question. Derived questions have at most three.
pub type Parts = SmallVec<[String; 3]>;

/// An authored question from the game data document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedQuestion {
    pub definition: String,
    pub parts: Vec<String>,
    pub answer: String,
}

impl CuratedQuestion {
    pub fn new<I, S>(definition: impl Into<String>, parts: I, answer: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            definition: definition.into(),
            parts: parts.into_iter().map(Into::into).collect(),
            answer: answer.into(),
        }
    }
}

/// One round's question.
///
/// ## Invariants
///
/// - Every element of `parts` appears in `bank`
/// - `bank` holds no duplicate strings
/// - For derived questions, `parts` concatenated equals `answer`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Display text.
    pub definition: String,

    /// Correct decomposition in construction order.
    pub parts: Parts,

    /// Correct spelling of the target word.
    pub answer: String,

    /// Parts plus distractors, in presentation order.
    pub bank: Vec<String>,
}

impl Question {
    /// Number of parts the player has to place.
    #[must_use]
    pub fn required_parts(&self) -> usize {
        self.parts.len()
    }

    /// True if `morpheme` is one of the bank tiles.
    #[must_use]
    pub fn bank_contains(&self, morpheme: &str) -> bool {
        self.bank.iter().any(|b| b == morpheme)
    }

    /// True if the parts concatenate to the answer, ignoring case.
    #[must_use]
    pub fn parts_spell_answer(&self) -> bool {
        self.parts.concat().to_lowercase() == self.answer.to_lowercase()
    }
}
