//! Duo word command handlers

use anyhow::{Context, Result};

use duo2anki_core::WordStore;

use crate::editor::confirm;
use crate::output::{DuoRow, Output};

/// List duo words matching a filter
pub fn list(
    store: &WordStore,
    filter: Option<String>,
    unlinked: bool,
    output: &Output,
) -> Result<()> {
    let words = store.list_duo_words(filter.as_deref().unwrap_or(""), unlinked);

    let rows: Vec<DuoRow> = words
        .into_iter()
        .map(|word| {
            let linked_to = linked_anki_word(store, &word);
            DuoRow { word, linked_to }
        })
        .collect();

    output.print_duo_words(&rows);
    Ok(())
}

/// Link a duo word to an anki word, creating the card if needed
pub fn link(
    store: &mut WordStore,
    duo_word: String,
    anki_word: String,
    output: &Output,
) -> Result<()> {
    let existed = store.find_key(&anki_word).is_some();

    let key = store
        .link(&duo_word, &anki_word)
        .with_context(|| format!("Failed to link '{}'", duo_word))?;

    if !existed {
        output.message(&format!("New anki entry: {} ({})", anki_word, key));
    }
    output.success(&format!("Linked {} → {}", duo_word, anki_word));
    Ok(())
}

/// Remove the link of a duo word
pub fn unlink(store: &mut WordStore, duo_word: String, output: &Output) -> Result<()> {
    store
        .unlink(&duo_word)
        .with_context(|| format!("Failed to unlink '{}'", duo_word))?;

    output.success(&format!("Unlinked {}", duo_word));
    Ok(())
}

/// Delete a duo word
pub fn delete(store: &mut WordStore, duo_word: String, yes: bool, output: &Output) -> Result<()> {
    // Fail on unknown words before prompting
    store.link_of(&duo_word)?;

    if !yes && output.should_prompt() {
        println!("Delete duo word: {}", duo_word);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    } else if !yes {
        output.message("Refusing to delete without confirmation. Pass --yes.");
        return Ok(());
    }

    store
        .delete_duo_word(&duo_word)
        .with_context(|| format!("Failed to delete '{}'", duo_word))?;

    output.success(&format!("Deleted duo word: {}", duo_word));
    Ok(())
}

/// Front of the card a duo word links to, if the link resolves
fn linked_anki_word(store: &WordStore, duo_word: &str) -> Option<String> {
    let key = store.link_of(duo_word).ok()??;
    store.anki_entry(key).ok().map(|entry| entry.word.clone())
}
