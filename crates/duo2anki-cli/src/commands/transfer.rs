//! Import and export command handlers

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use duo2anki_core::WordStore;

use crate::output::Output;

/// Import Duolingo vocabulary from a file, or stdin when no file is given
pub fn import(store: &mut WordStore, file: Option<PathBuf>, output: &Output) -> Result<()> {
    let added = match file {
        Some(path) => store
            .import_duo_words_from_file(&path)
            .with_context(|| format!("Failed to import {}", path.display()))?,
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read vocabulary from stdin")?;
            store
                .import_duo_words(&source)
                .context("Failed to import vocabulary")?
        }
    };

    output.success(&format!(
        "Imported {} new duo word(s), {} total",
        added,
        store.stats().duo_words
    ));
    Ok(())
}

/// Export anki entries as `word;translation` lines
pub fn export(store: &WordStore, path: PathBuf, output: &Output) -> Result<()> {
    store
        .export_anki_csv(&path)
        .with_context(|| format!("Failed to export to {}", path.display()))?;

    output.success(&format!(
        "Exported {} anki entr(ies) to {}",
        store.stats().anki_entries,
        path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use duo2anki_core::AnkiKey;
    use tempfile::TempDir;

    #[test]
    fn test_import_file_then_export() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = WordStore::open(temp_dir.path().join("words.json")).unwrap();
        let output = Output::new(OutputFormat::Quiet);

        let payload = temp_dir.path().join("vocab.json");
        std::fs::write(&payload, r#"{"vocab_overview":[{"word_string":"hola"}]}"#).unwrap();
        import(&mut store, Some(payload), &output).unwrap();
        assert_eq!(store.list_duo_words("", false), vec!["hola"]);

        store.update_anki_entry(&AnkiKey::from("k1"), "hola", "hello").unwrap();
        let target = temp_dir.path().join("export.csv");
        export(&store, target.clone(), &output).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "hola;hello");
    }

    #[test]
    fn test_import_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = WordStore::open(temp_dir.path().join("words.json")).unwrap();
        let output = Output::new(OutputFormat::Quiet);

        let missing = temp_dir.path().join("missing.json");
        assert!(import(&mut store, Some(missing), &output).is_err());
        assert_eq!(store.stats().duo_words, 0);
    }
}
