//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Filament has two configuration scopes:
//! - **Global**: User-level settings
//! - **Directory**: Per-directory overrides next to the revision files
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Directory config file (`filament.toml` in the scanned directory)
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$FILAMENT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/filament/config.toml`
//! 3. `~/.filament/config.toml`
//!
//! # Example
//!
//! ```toml
//! [sequence]
//! separator = "_"
//! extensions = ["py"]
//! skip_missing = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the global config location.
pub const GLOBAL_CONFIG_ENV: &str = "FILAMENT_CONFIG";

/// Name of the per-directory config file.
pub const DIR_CONFIG_FILE: &str = "filament.toml";

/// Default separator between the numeric prefix and the original filename.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// On-disk config schema. Strictly parsed: unknown fields are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Sequencing settings.
    #[serde(default)]
    pub sequence: SequenceSection,
}

/// The `[sequence]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceSection {
    /// Separator between the numeric prefix and the original filename.
    pub separator: Option<String>,
    /// File extensions eligible for scanning; empty or absent means all files.
    pub extensions: Option<Vec<String>>,
    /// Skip files without revision metadata instead of failing the run.
    pub skip_missing: Option<bool>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence automatically: directory config
/// overrides global config, which overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration, if a global config file was found.
    pub global: ConfigFile,
    /// Per-directory configuration, if present.
    pub dir: Option<ConfigFile>,
}

impl Config {
    /// Load configuration for a scan of `dir`.
    ///
    /// Missing files are not an error; malformed files are.
    pub fn load(dir: Option<&Path>) -> Result<Self, ConfigError> {
        let global = match global_config_path() {
            Some(path) => load_file(&path)?.unwrap_or_default(),
            None => ConfigFile::default(),
        };

        let dir_config = match dir {
            Some(dir) => load_file(&dir.join(DIR_CONFIG_FILE))?,
            None => None,
        };

        Ok(Self {
            global,
            dir: dir_config,
        })
    }

    /// Build a config from already-parsed files (used in tests).
    pub fn from_parts(global: ConfigFile, dir: Option<ConfigFile>) -> Self {
        Self { global, dir }
    }

    /// The prefix separator, with precedence applied.
    pub fn separator(&self) -> &str {
        self.dir
            .as_ref()
            .and_then(|c| c.sequence.separator.as_deref())
            .or(self.global.sequence.separator.as_deref())
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Eligible extensions, with precedence applied. Empty means all files.
    pub fn extensions(&self) -> &[String] {
        self.dir
            .as_ref()
            .and_then(|c| c.sequence.extensions.as_deref())
            .or(self.global.sequence.extensions.as_deref())
            .unwrap_or(&[])
    }

    /// Whether files without metadata are skipped, with precedence applied.
    pub fn skip_missing(&self) -> bool {
        self.dir
            .as_ref()
            .and_then(|c| c.sequence.skip_missing)
            .or(self.global.sequence.skip_missing)
            .unwrap_or(false)
    }
}

/// Load and strictly parse a config file, if it exists.
fn load_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(parsed))
}

/// Resolve the global config path, if any location applies.
fn global_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(GLOBAL_CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("filament").join("config.toml"));
    }
    dirs::home_dir().map(|home| home.join(".filament").join("config.toml"))
}
