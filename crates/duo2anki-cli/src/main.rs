//! duo2anki CLI
//!
//! Command-line interface for duo2anki - link Duolingo vocabulary to Anki cards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use duo2anki_core::{Config, StoreError, WordStore};

mod commands;
mod editor;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "duo2anki")]
#[command(about = "duo2anki - Link Duolingo vocabulary to Anki flashcards")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging (overridden by DUO2ANKI_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Store name (in the data directory) or path to a store file
    #[arg(short, long, global = true)]
    store: Option<String>,

    /// Config file to use instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new store
    New {
        /// Store name
        name: String,
        /// Language being learned
        #[arg(short, long)]
        lang: Option<String>,
        /// Directory for the store file (default: data directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Show or change store name and language
    Info {
        /// New store name
        #[arg(short, long)]
        name: Option<String>,
        /// New language
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Import Duolingo vocabulary (vocab_overview JSON)
    Import {
        /// Payload file (reads stdin if omitted)
        file: Option<PathBuf>,
    },
    /// Manage duo words
    Duo {
        #[command(subcommand)]
        command: DuoCommands,
    },
    /// Link a duo word to an anki word (created if missing)
    Link {
        /// Duo word
        duo_word: String,
        /// Front of the anki card
        anki_word: String,
    },
    /// Remove the link of a duo word
    Unlink {
        /// Duo word
        duo_word: String,
    },
    /// Manage anki entries
    Anki {
        #[command(subcommand)]
        command: AnkiCommands,
    },
    /// Export anki entries as `word;translation` lines
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Show store counts
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum DuoCommands {
    /// List duo words
    #[command(alias = "ls")]
    List {
        /// Case-insensitive filter (prefix matches first)
        filter: Option<String>,
        /// Only words not linked to an existing card
        #[arg(short, long)]
        unlinked: bool,
    },
    /// Delete a duo word
    #[command(alias = "rm")]
    Delete {
        /// Duo word
        word: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AnkiCommands {
    /// List anki entries
    #[command(alias = "ls")]
    List {
        /// Case-insensitive filter (prefix matches first)
        filter: Option<String>,
        /// Only entries without a translation
        #[arg(short, long)]
        untranslated: bool,
    },
    /// Add an untranslated entry
    Add {
        /// Front of the card
        word: String,
    },
    /// Show an entry and its linked duo words
    Show {
        /// Front of the card
        word: String,
    },
    /// Edit the front and back of an entry
    Edit {
        /// Front of the card
        word: String,
        /// New front
        #[arg(short, long)]
        front: Option<String>,
        /// New back (translation)
        #[arg(short, long)]
        back: Option<String>,
    },
    /// Delete an entry; linked duo words become unlinked
    #[command(alias = "rm")]
    Delete {
        /// Front of the card
        word: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, default_store, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let result = run(cli, &output);

    if let Err(ref e) = result {
        if let Some(suggestion) = e
            .downcast_ref::<StoreError>()
            .and_then(StoreError::recovery_suggestion)
        {
            if !output.is_quiet() {
                eprintln!("hint: {}", suggestion);
            }
        }
    }

    result
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config, cli.verbose);

    if let Commands::New { name, lang, dir } = cli.command {
        commands::store::create(&config, name, lang, dir, output)?;
        return Ok(());
    }

    let path = config.store_path(cli.store.as_deref());
    debug!(path = %path.display(), "Opening store");
    let mut store = WordStore::open(&path)
        .with_context(|| format!("Failed to open store {}", path.display()))?;

    match cli.command {
        Commands::New { .. } => unreachable!(),    // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Info { name, lang } => commands::store::info(&mut store, name, lang, output),
        Commands::Import { file } => commands::transfer::import(&mut store, file, output),
        Commands::Duo { command } => handle_duo_command(command, &mut store, output),
        Commands::Link {
            duo_word,
            anki_word,
        } => commands::duo::link(&mut store, duo_word, anki_word, output),
        Commands::Unlink { duo_word } => commands::duo::unlink(&mut store, duo_word, output),
        Commands::Anki { command } => handle_anki_command(command, &mut store, output),
        Commands::Export { path } => commands::transfer::export(&store, path, output),
        Commands::Status => commands::store::status(&store, output),
    }
}

fn handle_duo_command(command: DuoCommands, store: &mut WordStore, output: &Output) -> Result<()> {
    match command {
        DuoCommands::List { filter, unlinked } => {
            commands::duo::list(store, filter, unlinked, output)
        }
        DuoCommands::Delete { word, yes } => commands::duo::delete(store, word, yes, output),
    }
}

fn handle_anki_command(
    command: AnkiCommands,
    store: &mut WordStore,
    output: &Output,
) -> Result<()> {
    match command {
        AnkiCommands::List {
            filter,
            untranslated,
        } => commands::anki::list(store, filter, untranslated, output),
        AnkiCommands::Add { word } => commands::anki::add(store, word, output),
        AnkiCommands::Show { word } => commands::anki::show(store, word, output),
        AnkiCommands::Edit { word, front, back } => {
            commands::anki::edit(store, word, front, back, output)
        }
        AnkiCommands::Delete { word, yes } => commands::anki::delete(store, word, yes, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_link_with_global_store() {
        let cli = Cli::try_parse_from(["duo2anki", "link", "perro", "dog", "--store", "spanish"])
            .unwrap();
        assert_eq!(cli.store.as_deref(), Some("spanish"));
        assert!(matches!(
            cli.command,
            Commands::Link { ref duo_word, ref anki_word }
                if duo_word == "perro" && anki_word == "dog"
        ));
    }

    #[test]
    fn test_parse_list_aliases() {
        let cli = Cli::try_parse_from(["duo2anki", "duo", "ls", "ca", "--unlinked"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Duo {
                command: DuoCommands::List { ref filter, unlinked: true }
            } if filter.as_deref() == Some("ca")
        ));

        let cli = Cli::try_parse_from(["duo2anki", "anki", "ls", "-u"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Anki {
                command: AnkiCommands::List { filter: None, untranslated: true }
            }
        ));
    }
}
