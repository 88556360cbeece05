//! Configuration file loading with precedence handling.

use super::{DocumentConfig, RenderLimits};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FOLDLOG_CONFIG";
/// Environment variable overriding the theme.
pub const THEME_ENV_VAR: &str = "FOLDLOG_THEME";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/foldlog/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Theme name (e.g., "classic", "dark-flat").
    #[serde(default)]
    pub theme: Option<String>,

    /// Prefix entries with date and time.
    #[serde(default)]
    pub show_timestamps: Option<bool>,

    /// Show the marker column.
    #[serde(default)]
    pub show_emojis: Option<bool>,

    /// Maximum render recursion depth.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Items shown before a sequence or record folds.
    #[serde(default)]
    pub max_items: Option<usize>,

    /// Header names shown before the header table folds.
    #[serde(default)]
    pub max_headers: Option<usize>,

    /// Payload length before a body folds.
    #[serde(default)]
    pub max_body_length: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Theme name.
    pub theme: String,
    /// Settings handed to every document the binary builds.
    pub document: DocumentConfig,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: "classic".to_string(),
            document: DocumentConfig::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/foldlog/foldlog.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("foldlog").join("foldlog.log")
    } else {
        PathBuf::from("foldlog.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/foldlog/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("foldlog").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `FOLDLOG_CONFIG` environment variable
/// 3. Default path `~/.config/foldlog/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for `FOLDLOG_THEME`.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var(THEME_ENV_VAR) {
        config.theme = theme;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let limits = defaults.document.limits;

    ResolvedConfig {
        theme: config.theme.unwrap_or(defaults.theme),
        document: DocumentConfig {
            show_timestamps: config
                .show_timestamps
                .unwrap_or(defaults.document.show_timestamps),
            show_emojis: config.show_emojis.unwrap_or(defaults.document.show_emojis),
            limits: RenderLimits {
                max_depth: config.max_depth.unwrap_or(limits.max_depth),
                max_items: config.max_items.unwrap_or(limits.max_items),
                max_headers: config.max_headers.unwrap_or(limits.max_headers),
                max_body_length: config.max_body_length.unwrap_or(limits.max_body_length),
            },
        },
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    theme_override: Option<String>,
    timestamps_override: Option<bool>,
    emojis_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(theme) = theme_override {
        config.theme = theme;
    }

    if let Some(show) = timestamps_override {
        config.document.show_timestamps = show;
    }

    if let Some(show) = emojis_override {
        config.document.show_emojis = show;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
