//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/duo2anki/config.toml)
//! 3. Environment variables (DUO2ANKI_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::resolve_store_path;

/// Environment variable prefix
const ENV_PREFIX: &str = "DUO2ANKI";

/// Store opened when none is named
const DEFAULT_STORE: &str = "words";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding named stores (`<name>.json`)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Store name used when no store is given on the command line
    #[serde(default = "default_store")]
    pub default_store: String,

    /// Log destination; stderr when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_store: default_store(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (DUO2ANKI_DATA_DIR, DUO2ANKI_DEFAULT_STORE, DUO2ANKI_LOG_FILE)
    /// 2. Config file (~/.config/duo2anki/config.toml or DUO2ANKI_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load from an explicit config file if given, else from the default location
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // DUO2ANKI_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // DUO2ANKI_DEFAULT_STORE
        if let Ok(val) = std::env::var(format!("{}_DEFAULT_STORE", ENV_PREFIX)) {
            if !val.is_empty() {
                self.default_store = val;
            }
        }

        // DUO2ANKI_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with DUO2ANKI_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("duo2anki")
            .join("config.toml")
    }

    /// Path of a store given by name or path; `None` means the default store
    pub fn store_path(&self, store: Option<&str>) -> PathBuf {
        resolve_store_path(&self.data_dir, store.unwrap_or(&self.default_store))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("duo2anki")
}

fn default_store() -> String {
    DEFAULT_STORE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "DUO2ANKI_DATA_DIR",
        "DUO2ANKI_DEFAULT_STORE",
        "DUO2ANKI_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_store, "words");
        assert!(config.log_file.is_none());
        assert!(config.data_dir.ends_with("duo2anki"));
    }

    #[test]
    fn test_store_path() {
        let config = Config {
            data_dir: PathBuf::from("/data/duo2anki"),
            ..Config::default()
        };

        assert_eq!(
            config.store_path(None),
            PathBuf::from("/data/duo2anki/words.json")
        );
        assert_eq!(
            config.store_path(Some("spanish")),
            PathBuf::from("/data/duo2anki/spanish.json")
        );
        assert_eq!(
            config.store_path(Some("./mine.json")),
            PathBuf::from("./mine.json")
        );
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DUO2ANKI_DATA_DIR", "/tmp/duo2anki-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/duo2anki-test"));
    }

    #[test]
    fn test_env_override_default_store() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DUO2ANKI_DEFAULT_STORE", "german");
        config.apply_env_overrides();
        assert_eq!(config.default_store, "german");

        // Empty string keeps the current value
        env::set_var("DUO2ANKI_DEFAULT_STORE", "");
        config.apply_env_overrides();
        assert_eq!(config.default_store, "german");
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DUO2ANKI_LOG_FILE", "/tmp/duo2anki.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/duo2anki.log")));

        // Empty string clears it
        env::set_var("DUO2ANKI_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = Config {
            data_dir: PathBuf::from("/data/duo2anki"),
            default_store: "spanish".to_string(),
            log_file: Some(PathBuf::from("/tmp/duo2anki.log")),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("default_store"));
        assert!(toml_str.contains("log_file"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.default_store, config.default_store);
        assert_eq!(parsed.log_file, config.log_file);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            default_store = "french"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.default_store, "french");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_path_missing_file_uses_defaults() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        env::set_var("DUO2ANKI_DATA_DIR", temp_dir.path().join("data"));

        let config = Config::load_from_path(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.default_store, "words");
        // Data directory is created on load
        assert!(temp_dir.path().join("data").is_dir());
    }

    #[test]
    fn test_save_to_path_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            default_store: "italian".to_string(),
            log_file: None,
        };
        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&config_path)).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert_eq!(loaded.default_store, "italian");
    }
}
