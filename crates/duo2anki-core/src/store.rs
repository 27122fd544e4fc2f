//! Word store
//!
//! The `WordStore` holds one dataset in memory and mirrors it to a single
//! JSON document. Every mutating call rewrites that document before it
//! returns; there is no write buffering.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = WordStore::open("spanish.json")?;  // Creates or loads
//!
//! store.import_duo_words(&payload)?;
//! store.link("perro", "dog")?;
//!
//! let unlinked = store.list_duo_words("", true);
//! ```
//!
//! Guarded operations validate their arguments before touching the
//! dataset, so a failed call leaves memory unchanged. If the final write
//! fails, memory already holds the change while the file may not; call
//! [`WordStore::reload`] before mutating again if that matters.
//!
//! Two stores open on the same path overwrite each other's changes.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::filter::{rank_words, WordFilter};
use crate::import::parse_vocab_overview;
use crate::models::{AnkiEntry, AnkiKey, Dataset, StoreInfo, StoreStats};
use crate::storage::{JsonPersistence, StoreError, StoreResult};

/// A loaded word store
#[derive(Debug)]
pub struct WordStore {
    dataset: Dataset,
    persistence: JsonPersistence,
}

impl WordStore {
    /// Open the store at `path`, creating an empty one if the file is missing
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let persistence = JsonPersistence::new(path.as_ref());

        if !persistence.exists() {
            persistence.create()?;
            info!(path = %persistence.path().display(), "Created new store");
        }

        let dataset = persistence.load()?;
        debug!(
            path = %persistence.path().display(),
            duo = dataset.duo.len(),
            anki = dataset.anki.len(),
            "Loaded store"
        );

        Ok(Self {
            dataset,
            persistence,
        })
    }

    /// Discard in-memory state and read the backing file again
    pub fn reload(&mut self) -> StoreResult<()> {
        self.dataset = self.persistence.load()?;
        Ok(())
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    /// The in-memory document
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn info(&self) -> &StoreInfo {
        &self.dataset.info
    }

    /// Replace the store metadata
    pub fn update_info(&mut self, info: StoreInfo) -> StoreResult<()> {
        self.dataset.info = info;
        self.save()
    }

    // ==================== Duo Words ====================

    /// Add every word of a vocabulary overview payload that is not yet known
    ///
    /// New words start unlinked. Returns how many words were added.
    pub fn import_duo_words(&mut self, source: &str) -> StoreResult<usize> {
        let words = parse_vocab_overview(source)?;

        let before = self.dataset.duo.len();
        for word in words {
            self.dataset.duo.entry(word).or_insert(None);
        }
        let added = self.dataset.duo.len() - before;

        self.save()?;
        info!(added, total = self.dataset.duo.len(), "Imported duo words");
        Ok(added)
    }

    /// Read a vocabulary overview payload from a file and import it
    pub fn import_duo_words_from_file(&mut self, path: impl AsRef<Path>) -> StoreResult<usize> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| StoreError::from_read(e, path.to_path_buf()))?;
        self.import_duo_words(&source)
    }

    /// Duo words matching `filter`, prefix matches first
    ///
    /// With `unlinked_only`, words whose link is absent or dangling.
    pub fn list_duo_words(&self, filter: &str, unlinked_only: bool) -> Vec<String> {
        let words = self
            .dataset
            .duo
            .iter()
            .filter(|&(_, link)| !unlinked_only || !self.dataset.resolves(link.as_ref()))
            .map(|(word, _)| word.as_str());
        rank_words(filter, words)
    }

    /// The stored link of a duo word, which may be dangling
    pub fn link_of(&self, duo_word: &str) -> StoreResult<Option<&AnkiKey>> {
        self.dataset
            .duo
            .get(duo_word)
            .map(Option::as_ref)
            .ok_or_else(|| StoreError::UnknownDuoWord(duo_word.to_string()))
    }

    /// Whether a duo word links to an existing anki entry
    pub fn is_linked(&self, duo_word: &str) -> StoreResult<bool> {
        let link = self.link_of(duo_word)?;
        Ok(self.dataset.resolves(link))
    }

    /// Link a duo word to the anki entry with front `anki_word`
    ///
    /// The entry is created if no entry has that word. Returns its key.
    pub fn link(&mut self, duo_word: &str, anki_word: &str) -> StoreResult<AnkiKey> {
        self.ensure_duo_word(duo_word)?;

        let key = self.key_for_word(anki_word)?;
        if let Some(link) = self.dataset.duo.get_mut(duo_word) {
            *link = Some(key.clone());
        }

        self.save()?;
        debug!(duo_word, key = %key, "Linked duo word");
        Ok(key)
    }

    /// Clear the link of a duo word
    pub fn unlink(&mut self, duo_word: &str) -> StoreResult<()> {
        let link = self
            .dataset
            .duo
            .get_mut(duo_word)
            .ok_or_else(|| StoreError::UnknownDuoWord(duo_word.to_string()))?;
        *link = None;

        self.save()?;
        debug!(duo_word, "Unlinked duo word");
        Ok(())
    }

    /// Remove a duo word from the store
    pub fn delete_duo_word(&mut self, duo_word: &str) -> StoreResult<()> {
        self.dataset
            .duo
            .shift_remove(duo_word)
            .ok_or_else(|| StoreError::UnknownDuoWord(duo_word.to_string()))?;

        self.save()?;
        debug!(duo_word, "Deleted duo word");
        Ok(())
    }

    /// Sorted duo words linked to `key`
    pub fn duo_words_for_key(&self, key: &AnkiKey) -> Vec<String> {
        let mut words: Vec<String> = self
            .dataset
            .duo
            .iter()
            .filter(|&(_, link)| link.as_ref() == Some(key))
            .map(|(word, _)| word.clone())
            .collect();
        words.sort();
        words
    }

    /// Sorted duo words linked to the entry whose front is `anki_word`
    ///
    /// Empty if there is no such entry; nothing is created.
    pub fn duo_words_for_anki_word(&self, anki_word: &str) -> Vec<String> {
        self.find_key(anki_word)
            .map(|key| self.duo_words_for_key(&key))
            .unwrap_or_default()
    }

    // ==================== Anki Entries ====================

    /// Anki fronts matching `filter`, prefix matches first
    ///
    /// With `untranslated_only`, entries whose translation is empty.
    pub fn list_anki_words(&self, filter: &str, untranslated_only: bool) -> Vec<String> {
        let words = self
            .dataset
            .anki
            .values()
            .filter(|entry| !untranslated_only || !entry.is_translated())
            .map(|entry| entry.word.as_str());
        rank_words(filter, words)
    }

    /// Anki entries matching `filter` with their keys, ranked like
    /// [`WordStore::list_anki_words`]
    ///
    /// Entries sharing a front each get their own item, in store order.
    pub fn list_anki_entries(
        &self,
        filter: &str,
        untranslated_only: bool,
    ) -> Vec<(&AnkiKey, &AnkiEntry)> {
        let entries = self
            .dataset
            .anki
            .iter()
            .filter(|&(_, entry)| !untranslated_only || !entry.is_translated());
        WordFilter::new(filter).rank_by(entries, |(_, entry)| entry.word.as_str())
    }

    pub fn anki_entry(&self, key: &AnkiKey) -> StoreResult<&AnkiEntry> {
        self.dataset
            .anki
            .get(key)
            .ok_or_else(|| StoreError::UnknownAnkiKey(key.clone()))
    }

    /// Key of the entry whose front is `word`, without creating one
    ///
    /// Several entries with the same front should not exist, but nothing
    /// prevents it. When they do, the smallest key wins.
    pub fn find_key(&self, word: &str) -> Option<AnkiKey> {
        let mut matches = self
            .dataset
            .anki
            .iter()
            .filter(|&(_, entry)| entry.word == word)
            .map(|(key, _)| key);

        let first = matches.next()?;
        let mut count = 1;
        let mut chosen = first;
        for key in matches {
            count += 1;
            if key < chosen {
                chosen = key;
            }
        }
        if count > 1 {
            warn!(
                word,
                count,
                key = %chosen,
                "Several anki entries share a word, using the smallest key"
            );
        }

        Some(chosen.clone())
    }

    /// Key of the entry whose front is `word`, creating it if needed
    ///
    /// **Mutates**: when no entry has this front, a new untranslated entry
    /// with a fresh key is added and the store is saved.
    pub fn key_for_word(&mut self, word: &str) -> StoreResult<AnkiKey> {
        if let Some(key) = self.find_key(word) {
            return Ok(key);
        }

        let key = self.unused_key();
        self.dataset
            .anki
            .insert(key.clone(), AnkiEntry::untranslated(word));

        self.save()?;
        debug!(word, key = %key, "Created anki entry");
        Ok(key)
    }

    /// Set both sides of the entry at `key`, creating it if the key is new
    pub fn update_anki_entry(
        &mut self,
        key: &AnkiKey,
        word: impl Into<String>,
        translation: impl Into<String>,
    ) -> StoreResult<()> {
        let entry = AnkiEntry::new(word, translation);
        match self.dataset.anki.get_mut(key) {
            Some(existing) => *existing = entry,
            None => {
                self.dataset.anki.insert(key.clone(), entry);
            }
        }

        self.save()?;
        debug!(key = %key, "Updated anki entry");
        Ok(())
    }

    /// Remove an anki entry and unlink every duo word pointing at it
    ///
    /// Returns the duo words that were unlinked, sorted.
    pub fn delete_anki_entry(&mut self, key: &AnkiKey) -> StoreResult<Vec<String>> {
        self.dataset
            .anki
            .shift_remove(key)
            .ok_or_else(|| StoreError::UnknownAnkiKey(key.clone()))?;

        let mut unlinked = Vec::new();
        for (word, link) in self.dataset.duo.iter_mut() {
            if matches!(link, Some(linked) if linked == key) {
                *link = None;
                unlinked.push(word.clone());
            }
        }
        unlinked.sort();

        self.save()?;
        debug!(key = %key, unlinked = unlinked.len(), "Deleted anki entry");
        Ok(unlinked)
    }

    /// Write all entries as `word;translation` lines, in store order
    ///
    /// No header, no trailing newline, and no escaping: a `;` or newline
    /// inside a field ends up verbatim in the file.
    pub fn export_anki_csv(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let content = self.anki_csv();

        std::fs::write(path, content).map_err(|e| StoreError::from_io(e, path.to_path_buf()))?;
        info!(path = %path.display(), entries = self.dataset.anki.len(), "Exported anki entries");
        Ok(())
    }

    /// The export text for all entries
    pub fn anki_csv(&self) -> String {
        self.dataset
            .anki
            .values()
            .map(AnkiEntry::csv_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ==================== Stats ====================

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            duo_words: self.dataset.duo.len(),
            linked_duo_words: self
                .dataset
                .duo
                .values()
                .filter(|&link| self.dataset.resolves(link.as_ref()))
                .count(),
            anki_entries: self.dataset.anki.len(),
            untranslated_entries: self
                .dataset
                .anki
                .values()
                .filter(|entry| !entry.is_translated())
                .count(),
        }
    }

    // ==================== Internal ====================

    fn ensure_duo_word(&self, duo_word: &str) -> StoreResult<()> {
        self.link_of(duo_word).map(|_| ())
    }

    fn unused_key(&self) -> AnkiKey {
        loop {
            let key = AnkiKey::generate();
            if !self.dataset.anki.contains_key(&key) {
                return key;
            }
        }
    }

    fn save(&self) -> StoreResult<()> {
        self.persistence.save(&self.dataset)
    }
}

/// Resolve a store argument to a file path
///
/// Anything that looks like a path (has a separator or a `.json`
/// extension) is used as is; a bare name maps into `data_dir`.
pub fn resolve_store_path(data_dir: &Path, store: &str) -> PathBuf {
    let candidate = Path::new(store);
    let is_path = candidate.components().count() > 1
        || candidate
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_path {
        candidate.to_path_buf()
    } else {
        data_dir.join(format!("{}.json", store))
    }
}
