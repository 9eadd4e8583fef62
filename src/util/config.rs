//! Configuration file support for Lunargen.
//!
//! Lunargen supports two configuration file locations:
//! - Global: `~/.lunargen/config.toml` - User-wide defaults
//! - Project: `.lunargen/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags override both. These files only tune the CLI; generator jobs live
//! in `Lunargen.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::shell::ColorChoice;

/// Lunargen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal output settings
    pub term: TermConfig,
}

/// Terminal output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermConfig {
    /// Colour mode (auto, always, never)
    pub color: Option<ColorChoice>,

    /// Print per-header scan lines and debug logs
    pub verbose: Option<bool>,

    /// Errors only
    pub quiet: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.term.color.is_some() {
            self.term.color = other.term.color;
        }
        if other.term.verbose.is_some() {
            self.term.verbose = other.term.verbose;
        }
        if other.term.quiet.is_some() {
            self.term.quiet = other.term.quiet;
        }
    }

    pub fn color(&self) -> ColorChoice {
        self.term.color.unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.term.verbose.unwrap_or(false)
    }

    pub fn quiet(&self) -> bool {
        self.term.quiet.unwrap_or(false)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.lunargen/config.toml)
/// 2. Global config (~/.lunargen/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global lunargen config directory (~/.lunargen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".lunargen"))
}

/// Get the global config path (~/.lunargen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.lunargen/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".lunargen").join("config.toml")
}
