//! Duolingo vocabulary payload
//!
//! The vocabulary overview export is a large JSON document; only the
//! `word_string` of each `vocab_overview` record is read. Unknown fields
//! are ignored.

use serde::Deserialize;

use crate::storage::error::{StoreError, StoreResult};

#[derive(Debug, Deserialize)]
struct VocabOverview {
    vocab_overview: Vec<VocabRecord>,
}

#[derive(Debug, Deserialize)]
struct VocabRecord {
    word_string: String,
}

/// Parse a vocabulary overview payload into its words, in payload order
pub fn parse_vocab_overview(source: &str) -> StoreResult<Vec<String>> {
    let overview: VocabOverview =
        serde_json::from_str(source).map_err(|e| StoreError::InvalidImport {
            details: e.to_string(),
        })?;

    Ok(overview
        .vocab_overview
        .into_iter()
        .map(|record| record.word_string)
        .collect())
}
