//! The morpheme database and the game data document that carries it.
//!
//! The document is loaded once before any round starts:
//!
//! ```json
//! {
//!   "morphemes": {
//!     "prefixes": [{"morpheme": "re", "meaning": "again"}],
//!     "roots":    [{"morpheme": "act", "meaning": "do", "examples": ["reaction"]}],
//!     "suffixes": [{"morpheme": "ion", "meaning": "act of"}]
//!   },
//!   "questions": [
//!     {"definition": "...", "parts": ["re", "act", "ion"], "answer": "reaction"}
//!   ]
//! }
//! ```
//!
//! `questions` is only needed in curated mode.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::entry::{Category, MorphemeEntry};
use crate::core::error::{GameError, Result};
use crate::questions::CuratedQuestion;

/// Prefixes, roots and suffixes in document order. Read-only after load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphemeDatabase {
    prefixes: Vec<MorphemeEntry>,
    roots: Vec<MorphemeEntry>,
    suffixes: Vec<MorphemeEntry>,
}

impl MorphemeDatabase {
    pub fn new(
        prefixes: Vec<MorphemeEntry>,
        roots: Vec<MorphemeEntry>,
        suffixes: Vec<MorphemeEntry>,
    ) -> Self {
        Self {
            prefixes,
            roots,
            suffixes,
        }
    }

    /// Entries of one category, in document order.
    #[must_use]
    pub fn entries(&self, category: Category) -> &[MorphemeEntry] {
        match category {
            Category::Prefix => &self.prefixes,
            Category::Root => &self.roots,
            Category::Suffix => &self.suffixes,
        }
    }

    #[must_use]
    pub fn prefixes(&self) -> &[MorphemeEntry] {
        &self.prefixes
    }

    #[must_use]
    pub fn roots(&self) -> &[MorphemeEntry] {
        &self.roots
    }

    #[must_use]
    pub fn suffixes(&self) -> &[MorphemeEntry] {
        &self.suffixes
    }

    /// Iterate over every entry with its category, in lookup search order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &MorphemeEntry)> {
        Category::SEARCH_ORDER
            .into_iter()
            .flat_map(move |c| self.entries(c).iter().map(move |e| (c, e)))
    }

    /// Roots that can anchor a derived question.
    pub fn eligible_roots(&self) -> impl Iterator<Item = &MorphemeEntry> {
        self.roots.iter().filter(|r| r.has_examples())
    }

    /// Distinct morpheme strings across all categories.
    #[must_use]
    pub fn distinct_morphemes(&self) -> FxHashSet<&str> {
        self.iter().map(|(_, e)| e.morpheme.as_str()).collect()
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len() + self.roots.len() + self.suffixes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<()> {
        for (category, entry) in self.iter() {
            if entry.morpheme.is_empty() {
                return Err(GameError::InvalidData(format!(
                    "{category} entry with meaning {:?} has an empty morpheme",
                    entry.meaning
                )));
            }
        }
        Ok(())
    }
}

/// The loaded game data document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub morphemes: MorphemeDatabase,
    #[serde(default)]
    pub questions: Vec<CuratedQuestion>,
}

impl GameData {
    pub fn new(morphemes: MorphemeDatabase, questions: Vec<CuratedQuestion>) -> Self {
        Self {
            morphemes,
            questions,
        }
    }

    /// Load and validate the document from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::DataRead {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            morphemes = data.morphemes.len(),
            questions = data.questions.len(),
            "loaded game data"
        );
        Ok(data)
    }

    /// Parse and validate the document from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(text)?;
        data.validate()?;
        Ok(data)
    }

    /// Parse and validate the document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let data: Self = serde_json::from_reader(reader)?;
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<()> {
        self.morphemes.validate()?;
        for (i, q) in self.questions.iter().enumerate() {
            if q.answer.trim().is_empty() {
                return Err(GameError::InvalidData(format!("question {i} has an empty answer")));
            }
            if q.parts.is_empty() || q.parts.iter().any(String::is_empty) {
                return Err(GameError::InvalidData(format!(
                    "question {i} ({}) has missing or empty parts",
                    q.answer
                )));
            }
        }
        Ok(())
    }
}
