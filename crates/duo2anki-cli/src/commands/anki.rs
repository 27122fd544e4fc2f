//! Anki entry command handlers
//!
//! Entries are addressed by their front word, the way they are listed.

use anyhow::{anyhow, bail, Context, Result};

use duo2anki_core::{AnkiEntry, AnkiKey, WordStore};

use crate::editor::{confirm, is_interactive, prompt_with_default};
use crate::output::{AnkiRow, Output};

/// List anki entries matching a filter
pub fn list(
    store: &WordStore,
    filter: Option<String>,
    untranslated: bool,
    output: &Output,
) -> Result<()> {
    let rows = rows(store, filter.as_deref().unwrap_or(""), untranslated);
    output.print_anki_words(&rows);
    Ok(())
}

/// Add an untranslated entry, or report the existing one
pub fn add(store: &mut WordStore, word: String, output: &Output) -> Result<()> {
    if let Some(key) = store.find_key(&word) {
        output.message(&format!("Anki entry already exists: {} ({})", word, key));
        return Ok(());
    }

    let key = store
        .key_for_word(&word)
        .with_context(|| format!("Failed to add '{}'", word))?;

    output.success(&format!("Added anki entry: {} ({})", word, key));
    Ok(())
}

/// Show one entry and the duo words linked to it
pub fn show(store: &WordStore, word: String, output: &Output) -> Result<()> {
    let row = row_for_word(store, &word)?;
    output.print_anki_entry(&row);
    Ok(())
}

/// Edit the front and back of an entry
///
/// Without `--front`/`--back`, prompts for both on a terminal. The entry
/// must already exist, and the new front must not belong to another entry.
pub fn edit(
    store: &mut WordStore,
    word: String,
    front: Option<String>,
    back: Option<String>,
    output: &Output,
) -> Result<()> {
    let key = find_key(store, &word)?;
    let current = store.anki_entry(&key)?.clone();

    let (front, back) = if front.is_none() && back.is_none() {
        if !is_interactive() || !output.should_prompt() {
            bail!("Nothing to change. Pass --front and/or --back.");
        }
        println!("Editing anki entry: {}", key);
        println!("Press Enter to keep current value, or type new value.\n");
        (
            prompt_with_default("Front", &current.word)?,
            prompt_with_default("Back", &current.translation)?,
        )
    } else {
        (front, back)
    };

    let updated = AnkiEntry::new(
        front.unwrap_or_else(|| current.word.clone()),
        back.unwrap_or_else(|| current.translation.clone()),
    );
    if updated.word != current.word {
        if let Some(other) = store.find_key(&updated.word) {
            bail!(
                "Anki entry {} already has front '{}'. Pick another front.",
                other,
                updated.word
            );
        }
    }

    store
        .update_anki_entry(&key, updated.word.clone(), updated.translation.clone())
        .context("Failed to update anki entry")?;

    output.success("Anki entry updated");
    output.print_anki_entry(&AnkiRow {
        duo_words: store.duo_words_for_key(&key),
        key,
        entry: updated,
    });
    Ok(())
}

/// Delete an entry; linked duo words become unlinked
pub fn delete(store: &mut WordStore, word: String, yes: bool, output: &Output) -> Result<()> {
    let key = find_key(store, &word)?;
    let linked = store.duo_words_for_key(&key);

    if !yes && output.should_prompt() {
        println!("Delete anki entry: {}", word);
        if !linked.is_empty() {
            println!("This unlinks: {}", linked.join(", "));
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    } else if !yes {
        output.message("Refusing to delete without confirmation. Pass --yes.");
        return Ok(());
    }

    let unlinked = store
        .delete_anki_entry(&key)
        .with_context(|| format!("Failed to delete '{}'", word))?;

    output.success(&format!(
        "Deleted anki entry: {} ({} duo word(s) unlinked)",
        word,
        unlinked.len()
    ));
    Ok(())
}

fn find_key(store: &WordStore, word: &str) -> Result<AnkiKey> {
    store
        .find_key(word)
        .ok_or_else(|| anyhow!("No anki entry with front: {}", word))
}

fn row_for_word(store: &WordStore, word: &str) -> Result<AnkiRow> {
    let key = find_key(store, word)?;
    let entry = store.anki_entry(&key)?.clone();
    Ok(AnkiRow {
        duo_words: store.duo_words_for_key(&key),
        key,
        entry,
    })
}

/// One row per entry, duplicate fronts included
fn rows(store: &WordStore, filter: &str, untranslated: bool) -> Vec<AnkiRow> {
    store
        .list_anki_entries(filter, untranslated)
        .into_iter()
        .map(|(key, entry)| AnkiRow {
            key: key.clone(),
            entry: entry.clone(),
            duo_words: store.duo_words_for_key(key),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    fn open_temp(temp_dir: &TempDir) -> WordStore {
        WordStore::open(temp_dir.path().join("words.json")).unwrap()
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_edit_unknown_front_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_temp(&temp_dir);

        assert!(edit(&mut store, "ghost".to_string(), None, None, &quiet()).is_err());
        let back = Some("fantasma".to_string());
        assert!(edit(&mut store, "ghost".to_string(), None, back, &quiet()).is_err());

        assert!(store.dataset().anki.is_empty());
        let reopened = open_temp(&temp_dir);
        assert!(reopened.dataset().anki.is_empty());
    }

    #[test]
    fn test_edit_without_changes_leaves_entry_alone() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_temp(&temp_dir);
        store.update_anki_entry(&AnkiKey::from("k1"), "dog", "perro").unwrap();

        assert!(edit(&mut store, "dog".to_string(), None, None, &quiet()).is_err());
        assert_eq!(
            store.anki_entry(&AnkiKey::from("k1")).unwrap(),
            &AnkiEntry::new("dog", "perro")
        );
    }

    #[test]
    fn test_edit_merges_front_and_back() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_temp(&temp_dir);
        store.update_anki_entry(&AnkiKey::from("k1"), "dog", "").unwrap();

        let back = Some("perro".to_string());
        edit(&mut store, "dog".to_string(), None, back, &quiet()).unwrap();
        assert_eq!(
            store.anki_entry(&AnkiKey::from("k1")).unwrap(),
            &AnkiEntry::new("dog", "perro")
        );

        let front = Some("hound".to_string());
        edit(&mut store, "dog".to_string(), front, None, &quiet()).unwrap();
        assert_eq!(
            store.anki_entry(&AnkiKey::from("k1")).unwrap(),
            &AnkiEntry::new("hound", "perro")
        );
        assert_eq!(store.dataset().anki.len(), 1);
    }

    #[test]
    fn test_edit_refuses_front_of_another_entry() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_temp(&temp_dir);
        store.update_anki_entry(&AnkiKey::from("k1"), "dog", "perro").unwrap();
        store.update_anki_entry(&AnkiKey::from("k2"), "cat", "gato").unwrap();

        let front = Some("dog".to_string());
        assert!(edit(&mut store, "cat".to_string(), front, None, &quiet()).is_err());
        assert_eq!(
            store.anki_entry(&AnkiKey::from("k2")).unwrap(),
            &AnkiEntry::new("cat", "gato")
        );
    }

    #[test]
    fn test_rows_keep_duplicate_fronts_apart() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_temp(&temp_dir);
        store.update_anki_entry(&AnkiKey::from("b"), "dog", "perro").unwrap();
        store.update_anki_entry(&AnkiKey::from("a"), "dog", "can").unwrap();
        store
            .import_duo_words(r#"{"vocab_overview":[{"word_string":"perro"}]}"#)
            .unwrap();
        store.link("perro", "dog").unwrap();

        let listed_rows = rows(&store, "", false);
        let listed: Vec<(&str, &str)> = listed_rows
            .iter()
            .map(|row| (row.key.as_str(), row.entry.translation.as_str()))
            .collect();
        assert_eq!(listed, vec![("b", "perro"), ("a", "can")]);

        // link resolves the duplicate to the smallest key
        assert!(listed_rows[0].duo_words.is_empty());
        assert_eq!(listed_rows[1].duo_words, vec!["perro"]);
    }

    #[test]
    fn test_add_existing_front_does_not_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_temp(&temp_dir);

        add(&mut store, "dog".to_string(), &quiet()).unwrap();
        add(&mut store, "dog".to_string(), &quiet()).unwrap();
        assert_eq!(store.dataset().anki.len(), 1);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_temp(&temp_dir);
        store
            .import_duo_words(r#"{"vocab_overview":[{"word_string":"perro"}]}"#)
            .unwrap();
        store.link("perro", "dog").unwrap();

        // Quiet mode never prompts, so without --yes nothing happens
        delete(&mut store, "dog".to_string(), false, &quiet()).unwrap();
        assert!(store.find_key("dog").is_some());

        delete(&mut store, "dog".to_string(), true, &quiet()).unwrap();
        assert!(store.find_key("dog").is_none());
        assert!(!store.is_linked("perro").unwrap());

        assert!(delete(&mut store, "dog".to_string(), true, &quiet()).is_err());
    }
}
