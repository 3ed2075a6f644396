//! Verifier configuration.

use std::{env, path::Path};

pub const EXTENSION_VAR: &str = "SJAVAC_EXTENSION";
pub const COMMENT_MARKER_VAR: &str = "SJAVAC_COMMENT_MARKER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Suffix every verified path must end with.
    pub extension: String,
    /// Raw lines starting with this marker are skipped.
    pub comment_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extension: String::from(".sjava"),
            comment_marker: String::from("//"),
        }
    }
}

impl Config {
    /// Defaults, overridden by `SJAVAC_EXTENSION` / `SJAVAC_COMMENT_MARKER` when set.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(extension) = env::var(EXTENSION_VAR) {
            config.extension = extension;
        }
        if let Ok(marker) = env::var(COMMENT_MARKER_VAR) {
            if !marker.is_empty() {
                config.comment_marker = marker;
            }
        }
        config
    }

    pub fn accepts_path(&self, path: &Path) -> bool {
        path.to_string_lossy().ends_with(&self.extension)
    }
}
