//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::path::Path;

use duo2anki_core::{AnkiEntry, AnkiKey, StoreInfo, StoreStats};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// A duo word as listed, with whether it resolves to a card
#[derive(Debug, Clone)]
pub struct DuoRow {
    pub word: String,
    pub linked_to: Option<String>,
}

/// An anki word as listed, with the duo words studying it
#[derive(Debug, Clone)]
pub struct AnkiRow {
    pub key: AnkiKey,
    pub entry: AnkiEntry,
    pub duo_words: Vec<String>,
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print duo words, marking the ones linked to a card
    pub fn print_duo_words(&self, rows: &[DuoRow]) {
        match self.format {
            OutputFormat::Human => {
                if rows.is_empty() {
                    println!("No duo words found.");
                    return;
                }
                let width = column_width(rows.iter().map(|r| r.word.as_str()), 30);
                for row in rows {
                    match row.linked_to {
                        Some(ref anki_word) => println!(
                            "● {:<width$} → {}",
                            truncate(&row.word, width),
                            anki_word,
                            width = width
                        ),
                        None => println!("○ {}", row.word),
                    }
                }
                let linked = rows.iter().filter(|r| r.linked_to.is_some()).count();
                println!("\n{} word(s), {} linked", rows.len(), linked);
            }
            OutputFormat::Json => {
                let json_rows: Vec<_> = rows
                    .iter()
                    .map(|r| serde_json::json!({"word": r.word, "linked_to": r.linked_to}))
                    .collect();
                println!("{}", to_json(&json_rows));
            }
            OutputFormat::Quiet => {
                for row in rows {
                    println!("{}", row.word);
                }
            }
        }
    }

    /// Print anki entries with their linked duo words
    pub fn print_anki_words(&self, rows: &[AnkiRow]) {
        match self.format {
            OutputFormat::Human => {
                if rows.is_empty() {
                    println!("No anki entries found.");
                    return;
                }
                let width = column_width(rows.iter().map(|r| r.entry.word.as_str()), 30);
                for row in rows {
                    let marker = if row.duo_words.is_empty() { "○" } else { "●" };
                    let translation = if row.entry.is_translated() {
                        row.entry.translation.as_str()
                    } else {
                        "(untranslated)"
                    };
                    println!(
                        "{} {:<width$} | {}",
                        marker,
                        truncate(&row.entry.word, width),
                        truncate(translation, 40),
                        width = width
                    );
                }
                println!("\n{} entr(ies)", rows.len());
            }
            OutputFormat::Json => {
                let json_rows: Vec<_> = rows.iter().map(anki_row_json).collect();
                println!("{}", to_json(&json_rows));
            }
            OutputFormat::Quiet => {
                for row in rows {
                    println!("{}", row.entry.word);
                }
            }
        }
    }

    /// Print a single anki entry in full
    pub fn print_anki_entry(&self, row: &AnkiRow) {
        match self.format {
            OutputFormat::Human => {
                println!("Key:         {}", row.key);
                println!("Front:       {}", row.entry.word);
                println!(
                    "Back:        {}",
                    if row.entry.is_translated() {
                        row.entry.translation.as_str()
                    } else {
                        "(untranslated)"
                    }
                );
                if row.duo_words.is_empty() {
                    println!("Duo words:   (none)");
                } else {
                    println!("Duo words:   {}", row.duo_words.join(", "));
                }
            }
            OutputFormat::Json => {
                println!("{}", to_json(&anki_row_json(row)));
            }
            OutputFormat::Quiet => println!("{}", row.key),
        }
    }

    /// Print store metadata
    pub fn print_info(&self, info: &StoreInfo, path: &Path) {
        match self.format {
            OutputFormat::Human => {
                println!("Name:     {}", or_unset(&info.name));
                println!("Language: {}", or_unset(&info.lang));
                println!("File:     {}", path.display());
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"name": info.name, "lang": info.lang, "path": path})
                );
            }
            OutputFormat::Quiet => {
                println!("{}", info.name);
            }
        }
    }

    /// Print store counts
    pub fn print_stats(&self, info: &StoreInfo, path: &Path, stats: &StoreStats) {
        match self.format {
            OutputFormat::Human => {
                println!("duo2anki Status");
                println!("===============");
                println!();
                println!("Store:");
                println!("  Name:     {}", or_unset(&info.name));
                println!("  Language: {}", or_unset(&info.lang));
                println!("  File:     {}", path.display());
                println!();
                println!("Duo words:");
                println!("  Total:    {}", stats.duo_words);
                println!("  Linked:   {}", stats.linked_duo_words);
                println!("  Unlinked: {}", stats.unlinked_duo_words());
                println!();
                println!("Anki entries:");
                println!("  Total:        {}", stats.anki_entries);
                println!("  Untranslated: {}", stats.untranslated_entries);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "info": info,
                        "path": path,
                        "counts": stats
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", stats.unlinked_duo_words());
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn anki_row_json(row: &AnkiRow) -> serde_json::Value {
    serde_json::json!({
        "key": row.key,
        "word": row.entry.word,
        "translation": row.entry.translation,
        "duo_words": row.duo_words
    })
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Widest word, capped at `max`
fn column_width<'a>(words: impl Iterator<Item = &'a str>, max: usize) -> usize {
    words.map(|w| w.chars().count()).max().unwrap_or(0).min(max)
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
