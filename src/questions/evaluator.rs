//! Answer checking and hint text.

use serde::{Deserialize, Serialize};

use super::question::Question;
use crate::morphemes::MorphemeLookup;

/// Outcome of checking a submitted spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Trim and lowercase a submission. `None` if nothing is left.
#[must_use]
pub fn normalize(submitted: &str) -> Option<String> {
    let trimmed = submitted.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Compare a submission against the question's answer, ignoring case and
/// surrounding whitespace.
///
/// Empty or whitespace-only submissions return `None`: they are not an
/// attempt.
///
/// ```
/// use word_architect::questions::{check_answer, Question, Verdict};
///
/// let question = Question {
///     definition: "to build together".into(),
///     parts: ["con", "struct"].iter().map(|s| s.to_string()).collect(),
///     answer: "construct".into(),
///     bank: vec![],
/// };
///
/// assert_eq!(check_answer(" Construct ", &question), Some(Verdict::Correct));
/// assert_eq!(check_answer("   ", &question), None);
/// ```
#[must_use]
pub fn check_answer(submitted: &str, question: &Question) -> Option<Verdict> {
    let answer = normalize(submitted)?;
    if answer == question.answer.to_lowercase() {
        Some(Verdict::Correct)
    } else {
        Some(Verdict::Incorrect)
    }
}

/// Root-like parts with their meanings, joined by `", "`.
///
/// A part counts as root-like if it is a catalogued root or carries no
/// hyphen (hyphens mark bound affix forms such as `"-ing"`).
#[must_use]
pub fn build_hint(question: &Question, lookup: &MorphemeLookup<'_>) -> String {
    question
        .parts
        .iter()
        .filter(|part| lookup.is_root(part) || !part.contains('-'))
        .map(|part| lookup.resolve_with_fallback(part).label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every part with its meaning, in construction order, joined by `" + "`.
#[must_use]
pub fn build_breakdown(question: &Question, lookup: &MorphemeLookup<'_>) -> String {
    question
        .parts
        .iter()
        .map(|part| lookup.resolve_with_fallback(part).label())
        .collect::<Vec<_>>()
        .join(" + ")
}

/// A bank tile and its meaning, if the database lists it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankItem {
    pub morpheme: String,
    pub meaning: Option<String>,
}

/// Bank tiles in presentation order, with strict-mode meanings.
#[must_use]
pub fn bank_glossary(question: &Question, lookup: &MorphemeLookup<'_>) -> Vec<BankItem> {
    question
        .bank
        .iter()
        .map(|morpheme| BankItem {
            morpheme: morpheme.clone(),
            meaning: lookup.resolve_strict(morpheme).map(|e| e.meaning.clone()),
        })
        .collect()
}
