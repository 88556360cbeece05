//! Configuration module.
//!
//! [`DocumentConfig`] is what a document is built with; [`loader`] resolves it from
//! defaults, a TOML file, environment variables and CLI flags.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

/// Default recursion depth before the render engine stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 10;
/// Default number of sequence elements or record fields shown before folding.
pub const DEFAULT_MAX_ITEMS: usize = 10;
/// Default number of header names shown before folding.
pub const DEFAULT_MAX_HEADERS: usize = 10;
/// Default payload length (in bytes) shown before folding.
pub const DEFAULT_MAX_BODY_LENGTH: usize = 500;

/// Size thresholds used while rendering values and HTTP messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimits {
    /// Deepest nesting level rendered; anything deeper becomes a sentinel.
    pub max_depth: usize,
    /// Sequence elements / record fields shown before the table is folded.
    pub max_items: usize,
    /// Header names shown before the header table is folded.
    pub max_headers: usize,
    /// Payload length before a body or structured dump is folded.
    pub max_body_length: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_items: DEFAULT_MAX_ITEMS,
            max_headers: DEFAULT_MAX_HEADERS,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
        }
    }
}

/// Per-document settings fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Prefix each entry with its date and time.
    pub show_timestamps: bool,
    /// Show the marker column.
    pub show_emojis: bool,
    /// Rendering thresholds.
    pub limits: RenderLimits,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            show_emojis: true,
            limits: RenderLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_shows_timestamps_and_emojis() {
        let config = DocumentConfig::default();
        assert!(config.show_timestamps);
        assert!(config.show_emojis);
    }

    #[test]
    fn default_limits_match_documented_values() {
        let limits = RenderLimits::default();
        assert_eq!(limits.max_depth, 10);
        assert_eq!(limits.max_items, 10);
        assert_eq!(limits.max_headers, 10);
        assert_eq!(limits.max_body_length, 500);
    }

    #[test]
    fn config_is_copy_and_comparable() {
        let config = DocumentConfig::default();
        let copied = config;
        assert_eq!(config, copied);
    }
}
