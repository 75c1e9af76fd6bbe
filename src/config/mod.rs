//! Configuration management for llm-bridge
//!
//! Settings are resolved in order:
//! 1. Built-in defaults
//! 2. Settings file (`<config_dir>/llm-bridge/config.json`, or `--config`)
//! 3. Environment variables (highest priority)

pub mod settings;

use std::path::PathBuf;

pub use self::settings::{Settings, DEFAULT_LLM_TYPE, KEYS, LLM_TYPE_ENV};

/// Location helpers for configuration files
pub struct Config;

impl Config {
    /// Get the configuration directory path
    #[must_use]
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("llm-bridge")
    }

    /// Get the settings file path
    #[must_use]
    pub fn settings_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let path = Config::settings_path();
        assert!(path.ends_with("llm-bridge/config.json"));
    }
}
