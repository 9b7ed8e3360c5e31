//! Runtime configuration read from the environment.

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "TALKBOOK_DATA_DIR";
pub const SAVE_PATH_VAR: &str = "TALKBOOK_SAVE_PATH";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_SAVE_PATH: &str = "./save.json";

/// Paths the engine reads content from and writes progress to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub save_path: PathBuf,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// Call after `.env` files have been loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Unset or blank
    /// variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            data_dir: PathBuf::from(var(DATA_DIR_VAR, DEFAULT_DATA_DIR)),
            save_path: PathBuf::from(var(SAVE_PATH_VAR, DEFAULT_SAVE_PATH)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
