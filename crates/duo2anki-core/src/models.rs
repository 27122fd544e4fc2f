//! Data models for duo2anki
//!
//! Defines the persisted document: store info, duo words with their
//! optional links, and anki entries keyed by a generated id.
//! Field names and shapes match the JSON written by earlier versions,
//! so they must not change.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an anki entry
///
/// Opaque: newly generated keys are UUID v4 strings, but any string
/// found in an existing store is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AnkiKey(String);

impl AnkiKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnkiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AnkiKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AnkiKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A flashcard: front word and back translation
///
/// Persisted as a two-element array `[word, translation]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct AnkiEntry {
    /// Front of the card
    pub word: String,
    /// Back of the card, empty until translated
    pub translation: String,
}

impl AnkiEntry {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
        }
    }

    /// Create an entry with no translation yet
    pub fn untranslated(word: impl Into<String>) -> Self {
        Self::new(word, String::new())
    }

    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }

    /// Render as one export line: `word;translation`
    pub fn csv_line(&self) -> String {
        format!("{};{}", self.word, self.translation)
    }
}

impl From<(String, String)> for AnkiEntry {
    fn from((word, translation): (String, String)) -> Self {
        Self { word, translation }
    }
}

impl From<AnkiEntry> for (String, String) {
    fn from(entry: AnkiEntry) -> Self {
        (entry.word, entry.translation)
    }
}

/// Store metadata shown to the user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreInfo {
    /// Display name of the store
    pub name: String,
    /// Language being learned
    pub lang: String,
}

impl StoreInfo {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// The whole persisted document
///
/// `duo` maps each vocabulary word to the key of the card it is studied
/// through, or `null` when unlinked. A link may point at a key that is
/// no longer in `anki`; such words count as unlinked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    pub info: StoreInfo,
    pub duo: IndexMap<String, Option<AnkiKey>>,
    pub anki: IndexMap<AnkiKey, AnkiEntry>,
}

impl Dataset {
    /// The empty document written when a store is first created
    pub fn template() -> Self {
        Self::default()
    }

    /// Whether a link resolves to an existing anki entry
    pub fn resolves(&self, link: Option<&AnkiKey>) -> bool {
        link.is_some_and(|key| self.anki.contains_key(key))
    }
}

/// Counts summarising a store
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StoreStats {
    pub duo_words: usize,
    pub linked_duo_words: usize,
    pub anki_entries: usize,
    pub untranslated_entries: usize,
}

impl StoreStats {
    pub fn unlinked_duo_words(&self) -> usize {
        self.duo_words - self.linked_duo_words
    }
}
