//! Command handlers

pub mod anki;
pub mod config;
pub mod duo;
pub mod store;
pub mod transfer;
