//! Configuration types for natega.
//!
//! [`Config::load`] reads `~/.config/natega/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::archive::{ArchiveOptions, DATASET_ENTRY};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
location          = "http://localhost:5173/natega.zip"
entry             = "natega.json"
timeout_secs      = 30
max_archive_bytes = 67108864
max_entry_bytes   = 268435456

[search]
min_latency_ms = 0

[ui]
title = "نتيجة الثانوية العامة 2024 بالإسم"
theme = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/natega/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[source]` section: where the archive lives and how much of it to accept.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// `http://` or `https://` URL, or a local path (optionally `file://`-prefixed).
    #[serde(default = "default_location")]
    pub location: String,
    /// Dataset entry name inside the archive.
    #[serde(default = "default_entry")]
    pub entry: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_archive_bytes")]
    pub max_archive_bytes: u64,
    #[serde(default = "default_max_entry_bytes")]
    pub max_entry_bytes: u64,
}

fn default_location() -> String { "http://localhost:5173/natega.zip".to_string() }
fn default_entry() -> String { DATASET_ENTRY.to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_max_archive_bytes() -> u64 { 64 * 1024 * 1024 }
fn default_max_entry_bytes() -> u64 { 256 * 1024 * 1024 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            entry: default_entry(),
            timeout_secs: default_timeout_secs(),
            max_archive_bytes: default_max_archive_bytes(),
            max_entry_bytes: default_max_entry_bytes(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn archive_options(&self) -> ArchiveOptions {
        ArchiveOptions {
            entry: self.entry.clone(),
            max_entry_bytes: self.max_entry_bytes,
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Minimum time a search stays "in progress", so the busy indicator is
    /// visible. 0 disables the floor.
    #[serde(default)]
    pub min_latency_ms: u64,
}

impl SearchConfig {
    pub fn min_latency(&self) -> Duration {
        Duration::from_millis(self.min_latency_ms)
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_title() -> String { "نتيجة الثانوية العامة 2024 بالإسم".to_string() }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/natega/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Parse a TOML override on top of the built-in defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("natega")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
