//! Configuration handling
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/verbalingo/` on Linux). `VERBALINGO_CONFIG_DIR` overrides the
//! directory, which the integration tests rely on.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item, Table};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "VERBALINGO_CONFIG_DIR";

/// Backend API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Default transcript/search language
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
            language: "en".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Playback and transcript sync settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Seconds added to playback time before segment lookup
    pub lookahead_offset_secs: f64,
    /// How often the watch view samples playback time
    pub tick_millis: u64,
    /// Seek distance for arrow keys
    pub seek_step_secs: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            lookahead_offset_secs: crate::transcript::LOOKAHEAD_OFFSET,
            tick_millis: 250,
            seek_step_secs: 5.0,
        }
    }
}

/// Chat session history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Days after the last update before a session is evicted
    pub ttl_days: u32,
    /// Storage directory (defaults to the platform data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            ttl_days: 30,
            directory: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub player: PlayerConfig,
    pub sessions: SessionsConfig,
}

impl Config {
    /// Directory holding `config.toml`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|d| d.join("verbalingo"))
            .context("Could not determine config directory")
    }

    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write configuration, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Directory for chat session files.
    pub fn sessions_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.sessions.directory {
            return Ok(dir.clone());
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir).join("sessions"));
        }
        dirs::data_dir()
            .map(|d| d.join("verbalingo").join("sessions"))
            .context("Could not determine data directory")
    }
}

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct MigrateResult {
    /// Updated TOML content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist before
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add fields missing from `content` using the default configuration.
///
/// Existing values, comments, and unknown keys are preserved. Only
/// missing keys and sections are appended.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Config file is not valid TOML")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?
        .parse()
        .context("Default config is not valid TOML")?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };

        if !doc.contains_key(section) {
            doc.insert(section, Item::Table(Table::new()));
            sections_added.push(section.to_string());
        }

        let Some(table) = doc[section].as_table_mut() else {
            // Present but not a table, leave the user's value alone
            continue;
        };

        for (key, value) in default_table.iter() {
            if !table.contains_key(key) {
                table.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
