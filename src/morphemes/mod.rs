//! Morpheme data: entries, the read-only database, and lookup.
//!
//! ## Key Types
//!
//! - `Category`: prefix, root or suffix
//! - `MorphemeEntry`: a morpheme, its meaning, and example words
//! - `MorphemeDatabase`: all entries, in document order
//! - `GameData`: the loaded document (database plus curated questions)
//! - `MorphemeLookup`: exact-match resolution in strict and fallback modes

pub mod database;
pub mod entry;
pub mod lookup;

pub use database::{GameData, MorphemeDatabase};
pub use entry::{Category, MorphemeEntry};
pub use lookup::{MorphemeLookup, Resolved, FALLBACK_MEANING};
