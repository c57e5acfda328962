//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/weblauncher/config.toml)
//! 3. Environment variables (WEBLAUNCHER_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::MINE_CATEGORY;

/// Environment variable prefix
const ENV_PREFIX: &str = "WEBLAUNCHER";

/// File name of the canonical data file
pub const DATA_FILE_NAME: &str = "custom_sites.json";

/// Directory name used by earlier releases under the platform data roots
const LEGACY_APP_DIR: &str = "WebLauncher";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the data file and its backup
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Whether to copy the data file to `<data file>.bak` before each save
    #[serde(default = "default_backup_enabled")]
    pub backup_enabled: bool,

    /// Category assigned to new sites when none is given
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Historical data file locations consulted once for migration, in order
    #[serde(default = "default_legacy_paths")]
    pub legacy_paths: Vec<PathBuf>,

    /// Log file path (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backup_enabled: default_backup_enabled(),
            default_category: default_category(),
            legacy_paths: default_legacy_paths(),
            log_file: None,
        }
    }
}

impl Config {
    /// Create a configuration rooted at a specific data directory
    ///
    /// No legacy paths are consulted; useful for tests and embedding.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            legacy_paths: Vec::new(),
            ..Self::default()
        }
    }

    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (WEBLAUNCHER_DATA_DIR, WEBLAUNCHER_BACKUP)
    /// 2. Config file (~/.config/weblauncher/config.toml or WEBLAUNCHER_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring an explicit path given on the command line
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
        // WEBLAUNCHER_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            if !val.is_empty() {
                self.data_dir = PathBuf::from(val);
            }
        }

        // WEBLAUNCHER_BACKUP
        if let Ok(val) = std::env::var(format!("{}_BACKUP", ENV_PREFIX)) {
            self.backup_enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }
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
    /// Can be overridden with WEBLAUNCHER_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("weblauncher")
            .join("config.toml")
    }

    /// Get the path to the canonical data file
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE_NAME)
    }

    /// Get the path to the single backup of the data file
    pub fn backup_file(&self) -> PathBuf {
        self.data_dir.join(format!("{}.bak", DATA_FILE_NAME))
    }

    /// Get the effective log file path
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    home_dir().join(".weblauncher")
}

fn default_backup_enabled() -> bool {
    true
}

fn default_category() -> String {
    MINE_CATEGORY.to_string()
}

/// Locations used by earlier releases, in the order they are tried
pub fn default_legacy_paths() -> Vec<PathBuf> {
    let home = home_dir();
    let mut paths = vec![home
        .join("Library")
        .join("Application Support")
        .join(LEGACY_APP_DIR)
        .join(DATA_FILE_NAME)];

    if let Some(appdata) = std::env::var_os("APPDATA").filter(|v| !v.is_empty()) {
        paths.push(
            PathBuf::from(appdata)
                .join(LEGACY_APP_DIR)
                .join(DATA_FILE_NAME),
        );
    }

    paths.push(home.join(".config").join(LEGACY_APP_DIR).join(DATA_FILE_NAME));
    paths
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
