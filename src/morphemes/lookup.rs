//! Resolve a morpheme string back to its database record.
//!
//! One search (prefixes, then roots, then suffixes, first exact match) with
//! two named modes:
//!
//! - `resolve_with_fallback`: always yields something to display; unknown
//!   fragments get the generic meaning `"base word"`. Used by hints and
//!   answer breakdowns.
//! - `resolve_strict`: `None` on a miss. Used when showing bank meanings,
//!   where a placeholder would be misleading.

use rustc_hash::FxHashMap;

use super::database::MorphemeDatabase;
use super::entry::{Category, MorphemeEntry};

/// Meaning shown for fragments the database does not list.
pub const FALLBACK_MEANING: &str = "base word";

/// Result of a fallback-mode lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// Found in the database.
    Known {
        category: Category,
        entry: &'a MorphemeEntry,
    },
    /// Not catalogued, e.g. a bound root variant like `"duct"` in `"conductor"`
    /// when only `"duc"` is listed.
    Unresolved { morpheme: String },
}

impl Resolved<'_> {
    #[must_use]
    pub fn morpheme(&self) -> &str {
        match self {
            Resolved::Known { entry, .. } => &entry.morpheme,
            Resolved::Unresolved { morpheme } => morpheme,
        }
    }

    #[must_use]
    pub fn meaning(&self) -> &str {
        match self {
            Resolved::Known { entry, .. } => &entry.meaning,
            Resolved::Unresolved { .. } => FALLBACK_MEANING,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Resolved::Known { .. })
    }

    /// `"<morpheme> (<meaning>)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.morpheme(), self.meaning())
    }
}

/// Exact-match index over a database.
///
/// Each morpheme string maps to its first occurrence in search order, so a
/// string listed both as a prefix and as a root resolves to the prefix.
#[derive(Debug)]
pub struct MorphemeLookup<'a> {
    db: &'a MorphemeDatabase,
    index: FxHashMap<&'a str, (Category, usize)>,
}

impl<'a> MorphemeLookup<'a> {
    #[must_use]
    pub fn new(db: &'a MorphemeDatabase) -> Self {
        let mut index = FxHashMap::default();
        for category in Category::SEARCH_ORDER {
            for (i, entry) in db.entries(category).iter().enumerate() {
                index.entry(entry.morpheme.as_str()).or_insert((category, i));
            }
        }
        Self { db, index }
    }

    fn find(&self, morpheme: &str) -> Option<(Category, &'a MorphemeEntry)> {
        let &(category, i) = self.index.get(morpheme)?;
        Some((category, &self.db.entries(category)[i]))
    }

    /// Strict mode: the record, or `None` if no category lists the string.
    #[must_use]
    pub fn resolve_strict(&self, morpheme: &str) -> Option<&'a MorphemeEntry> {
        self.find(morpheme).map(|(_, entry)| entry)
    }

    /// Fallback mode: the record, or an `Unresolved` marker.
    #[must_use]
    pub fn resolve_with_fallback(&self, morpheme: &str) -> Resolved<'a> {
        match self.find(morpheme) {
            Some((category, entry)) => Resolved::Known { category, entry },
            None => Resolved::Unresolved {
                morpheme: morpheme.to_string(),
            },
        }
    }

    /// True if any root entry has exactly this morpheme.
    ///
    /// Checks the roots themselves, not the first match in search order.
    #[must_use]
    pub fn is_root(&self, morpheme: &str) -> bool {
        self.db.roots().iter().any(|r| r.morpheme == morpheme)
    }
}
