//! Question generation.
//!
//! Two strategies, chosen by `GenerationMode`:
//!
//! - **Curated**: pick an authored record; parts and answer are verbatim.
//! - **Derived**: pick a root with example words, pick one example as the
//!   answer, and split it with [`decompose`].
//!
//! Both then fill a distractor bank from the database and shuffle it.
//!
//! ## Decomposition
//!
//! A first-match string heuristic, not a morphological analyzer:
//!
//! 1. The first prefix (document order) the answer starts with becomes the
//!    first part; its meaning is prepended to the definition.
//! 2. The first suffix the remainder ends with becomes the last part, the
//!    middle becomes the root part; its meaning is appended.
//! 3. With no suffix match the whole remainder is the root part.
//!
//! There is no longest-match preference, so a word whose root happens to
//! start with a listed prefix (e.g. "interest" with "inter") is mis-split.
//! Matches that would leave nothing behind are skipped, so no part is empty.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use super::question::{CuratedQuestion, Parts, Question};
use crate::core::config::{GameConfig, GenerationMode};
use crate::core::error::{GameError, Result};
use crate::core::rng::GameRng;
use crate::morphemes::{Category, GameData, MorphemeDatabase, MorphemeEntry};

/// A word split into parts, with the definition built along the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition {
    pub parts: Parts,
    pub definition: String,
}

/// Split `answer` into prefix/root/suffix parts.
///
/// `root` supplies the `(Meaning: ...)` anchor of the definition.
///
/// ```
/// use word_architect::morphemes::{MorphemeDatabase, MorphemeEntry};
/// use word_architect::questions::decompose;
///
/// let root = MorphemeEntry::new("act", "do").with_examples(["reaction"]);
/// let db = MorphemeDatabase::new(
///     vec![MorphemeEntry::new("re", "again")],
///     vec![root.clone()],
///     vec![MorphemeEntry::new("ion", "act of")],
/// );
///
/// let split = decompose("reaction", &root, &db);
/// assert_eq!(split.parts.as_slice(), ["re", "act", "ion"]);
/// assert_eq!(split.definition, "again, (Meaning: do), act of");
/// ```
#[must_use]
pub fn decompose(answer: &str, root: &MorphemeEntry, db: &MorphemeDatabase) -> Decomposition {
    let mut parts = Parts::new();
    let mut definition = format!("(Meaning: {})", root.meaning);
    let mut remainder = answer;

    let prefix = db
        .prefixes()
        .iter()
        .find(|p| remainder.len() > p.morpheme.len() && remainder.starts_with(&p.morpheme));
    if let Some(prefix) = prefix {
        parts.push(prefix.morpheme.clone());
        remainder = &remainder[prefix.morpheme.len()..];
        definition = format!("{}, {definition}", prefix.meaning);
    }

    let suffix = db
        .suffixes()
        .iter()
        .find(|s| remainder.len() > s.morpheme.len() && remainder.ends_with(&s.morpheme));
    match suffix {
        Some(suffix) => {
            let middle = &remainder[..remainder.len() - suffix.morpheme.len()];
            parts.push(middle.to_string());
            parts.push(suffix.morpheme.clone());
            definition = format!("{definition}, {}", suffix.meaning);
        }
        None => parts.push(remainder.to_string()),
    }

    Decomposition { parts, definition }
}

/// Builds questions according to the configured mode.
#[derive(Clone, Debug)]
pub struct QuestionGenerator {
    mode: GenerationMode,
    bank_size: usize,
    max_attempts: usize,
}

impl QuestionGenerator {
    #[must_use]
    pub fn new(mode: GenerationMode) -> Self {
        Self {
            mode,
            bank_size: 8,
            max_attempts: 1000,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            mode: config.mode,
            bank_size: config.bank_size,
            max_attempts: config.max_attempts,
        }
    }

    #[must_use]
    pub fn with_bank_size(mut self, size: usize) -> Self {
        self.bank_size = size;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    #[must_use]
    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Generate a fresh question.
    pub fn generate(&self, data: &GameData, rng: &mut GameRng) -> Result<Question> {
        match self.mode {
            GenerationMode::Curated => self.curated(&data.questions, &data.morphemes, rng),
            GenerationMode::Derived => self.derived(&data.morphemes, rng),
        }
    }

    /// Pick an authored question uniformly at random.
    pub fn curated(
        &self,
        questions: &[CuratedQuestion],
        db: &MorphemeDatabase,
        rng: &mut GameRng,
    ) -> Result<Question> {
        let record = rng.choose(questions).ok_or(GameError::NoCuratedQuestions)?;
        let parts: Parts = record.parts.iter().cloned().collect();
        let bank = self.build_bank(&parts, db, rng)?;

        debug!(answer = %record.answer, "picked curated question");
        Ok(Question {
            definition: record.definition.clone(),
            parts,
            answer: record.answer.clone(),
            bank,
        })
    }

    /// Derive a question from a random root's example word.
    pub fn derived(&self, db: &MorphemeDatabase, rng: &mut GameRng) -> Result<Question> {
        let eligible: Vec<&MorphemeEntry> = db.eligible_roots().collect();
        let root = *rng.choose(&eligible).ok_or(GameError::NoEligibleRoot)?;

        let examples: Vec<&String> = root.examples.iter().filter(|e| !e.is_empty()).collect();
        let answer = *rng.choose(&examples).ok_or(GameError::NoEligibleRoot)?;

        let Decomposition { parts, definition } = decompose(answer, root, db);
        debug!(root = %root.morpheme, %answer, ?parts, "derived question");

        let bank = self.build_bank(&parts, db, rng)?;
        Ok(Question {
            definition,
            parts,
            answer: answer.clone(),
            bank,
        })
    }

    /// Deduplicated `parts` plus random distractors, shuffled.
    ///
    /// Fails with `InsufficientData` when the database cannot supply enough
    /// distinct morphemes, or when `max_attempts` draws did not fill the bank.
    pub fn build_bank(
        &self,
        parts: &[String],
        db: &MorphemeDatabase,
        rng: &mut GameRng,
    ) -> Result<Vec<String>> {
        let mut bank: Vec<String> = Vec::with_capacity(self.bank_size.max(parts.len()));
        for part in parts {
            if !bank.contains(part) {
                bank.push(part.clone());
            }
        }

        if bank.len() < self.bank_size {
            let available = {
                let mut distinct: FxHashSet<&str> = db.distinct_morphemes();
                distinct.extend(bank.iter().map(String::as_str));
                distinct.len()
            };
            if available < self.bank_size {
                return Err(GameError::InsufficientData {
                    needed: self.bank_size,
                    available,
                });
            }

            let mut attempts = 0;
            while bank.len() < self.bank_size {
                if attempts == self.max_attempts {
                    warn!(
                        attempts,
                        filled = bank.len(),
                        needed = self.bank_size,
                        "gave up filling the morpheme bank"
                    );
                    return Err(GameError::InsufficientData {
                        needed: self.bank_size,
                        available: bank.len(),
                    });
                }
                attempts += 1;

                let Some(&category) = rng.choose(&Category::DISTRACTOR_ORDER) else {
                    continue;
                };
                let Some(entry) = rng.choose(db.entries(category)) else {
                    continue;
                };
                if !bank.contains(&entry.morpheme) {
                    bank.push(entry.morpheme.clone());
                }
            }
        }

        rng.shuffle(&mut bank);
        Ok(bank)
    }
}
