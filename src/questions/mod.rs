//! Questions: records, generation, and answer/hint evaluation.
//!
//! ## Key Types
//!
//! - `Question`: definition, correct parts, answer, and shuffled bank
//! - `CuratedQuestion`: an authored record from the game data
//! - `QuestionGenerator`: curated or derived question generation
//! - `Verdict`: result of checking a spelling

pub mod evaluator;
pub mod generator;
pub mod question;

pub use evaluator::{
    bank_glossary, build_breakdown, build_hint, check_answer, normalize, BankItem, Verdict,
};
pub use generator::{decompose, Decomposition, QuestionGenerator};
pub use question::{CuratedQuestion, Parts, Question};
