//! duo2anki Core Library
//!
//! Links vocabulary learned on Duolingo ("duo words") to Anki flashcards
//! ("anki entries") and keeps both in a single JSON store.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = WordStore::open("spanish.json")?;
//!
//! store.import_duo_words(&vocab_overview_json)?;
//! let key = store.link("perro", "dog")?;
//! store.update_anki_entry(&key, "dog", "el perro")?;
//!
//! store.export_anki_csv("anki.csv")?;
//! ```
//!
//! # Modules
//!
//! - `store`: the word store (main entry point)
//! - `models`: persisted document types
//! - `filter`: prefix/substring word search
//! - `import`: Duolingo vocabulary payload parsing
//! - `storage`: JSON persistence and errors
//! - `config`: application configuration

pub mod config;
pub mod filter;
pub mod import;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use filter::{rank_words, MatchKind, WordFilter};
pub use models::{AnkiEntry, AnkiKey, Dataset, StoreInfo, StoreStats};
pub use storage::{JsonPersistence, StoreError, StoreResult};
pub use store::{resolve_store_path, WordStore};
