//! Storage layer
//!
//! A store is a single JSON document on disk. Every change rewrites the
//! whole document; there is no incremental persistence and no locking
//! against other writers.

pub mod error;
pub mod persistence;

pub use error::{StoreError, StoreResult};
pub use persistence::JsonPersistence;
