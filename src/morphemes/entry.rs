//! Morpheme entries and their categories.

use serde::{Deserialize, Serialize};

/// The three morpheme categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Prefix,
    Root,
    Suffix,
}

impl Category {
    /// Lookup search order: prefixes, then roots, then suffixes.
    pub const SEARCH_ORDER: [Category; 3] = [Category::Prefix, Category::Root, Category::Suffix];

    /// Category order used when drawing distractors.
    pub const DISTRACTOR_ORDER: [Category; 3] =
        [Category::Prefix, Category::Suffix, Category::Root];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Prefix => "prefix",
            Category::Root => "root",
            Category::Suffix => "suffix",
        };
        f.write_str(name)
    }
}

/// A morpheme with its meaning and, for roots, example words built on it.
///
/// ```
/// use word_architect::morphemes::MorphemeEntry;
///
/// let act = MorphemeEntry::new("act", "do").with_examples(["reaction", "actor"]);
/// assert!(act.has_examples());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphemeEntry {
    pub morpheme: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl MorphemeEntry {
    pub fn new(morpheme: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            morpheme: morpheme.into(),
            meaning: meaning.into(),
            examples: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// True if at least one non-empty example word is listed.
    #[must_use]
    pub fn has_examples(&self) -> bool {
        self.examples.iter().any(|e| !e.is_empty())
    }

    /// `"<morpheme> (<meaning>)"`, the form used in hints.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.morpheme, self.meaning)
    }
}
