//! Store command handlers: create, metadata and status

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use duo2anki_core::{resolve_store_path, Config, StoreInfo, WordStore};

use crate::output::Output;

/// Create a new named store
///
/// The file goes into `dir` when given, else the configured data directory.
pub fn create(
    config: &Config,
    name: String,
    lang: Option<String>,
    dir: Option<PathBuf>,
    output: &Output,
) -> Result<WordStore> {
    if name.trim().is_empty() {
        bail!("Store name cannot be empty");
    }

    let path = match dir {
        Some(dir) => dir.join(format!("{}.json", name)),
        None => resolve_store_path(&config.data_dir, &name),
    };
    if path.exists() {
        bail!("A store already exists at {}", path.display());
    }

    let mut store = WordStore::open(&path)
        .with_context(|| format!("Failed to create store at {}", path.display()))?;
    store
        .update_info(StoreInfo::new(name, lang.unwrap_or_default()))
        .context("Failed to save store info")?;

    output.success(&format!("Created store: {}", path.display()));
    Ok(store)
}

/// Show or change the store name and language
pub fn info(
    store: &mut WordStore,
    name: Option<String>,
    lang: Option<String>,
    output: &Output,
) -> Result<()> {
    if name.is_none() && lang.is_none() {
        output.print_info(store.info(), store.path());
        return Ok(());
    }

    let current = store.info().clone();
    let info = StoreInfo {
        name: name.unwrap_or(current.name),
        lang: lang.unwrap_or(current.lang),
    };
    store
        .update_info(info)
        .context("Failed to update store info")?;

    output.success("Store info updated");
    output.print_info(store.info(), store.path());
    Ok(())
}

/// Show store counts
pub fn status(store: &WordStore, output: &Output) -> Result<()> {
    output.print_stats(store.info(), store.path(), &store.stats());
    Ok(())
}
