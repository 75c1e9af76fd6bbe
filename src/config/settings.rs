//! Wrapper identity settings (stored in `<config_dir>/llm-bridge/config.json`)

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BridgeError, Result};

/// Identifier reported to the host when none is configured
pub const DEFAULT_LLM_TYPE: &str = "llm-bridge";

/// Environment variable overriding [`Settings::llm_type`]
pub const LLM_TYPE_ENV: &str = "LLM_BRIDGE_LLM_TYPE";

/// Keys accepted by [`Settings::get`] and [`Settings::set`]
pub const KEYS: [&str; 3] = ["llm_type", "tags", "verbose"];

/// Settings controlling how the wrapper presents itself to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Identifier reported to the host framework
    #[serde(default = "default_llm_type")]
    pub llm_type: String,

    /// Tags attached to host runs
    #[serde(default)]
    pub tags: Vec<String>,

    /// Verbose logging enabled
    #[serde(default)]
    pub verbose: bool,
}

fn default_llm_type() -> String {
    DEFAULT_LLM_TYPE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_type: default_llm_type(),
            tags: Vec::new(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Load settings from the default location and apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load() -> Result<Self> {
        Self::load_from(&super::Config::settings_path())
    }

    /// Load settings from `path`, apply environment overrides and validate
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = Self::load_from_path(path)?;
        settings.apply_env();
        settings.validate()?;
        Ok(settings)
    }

    /// Change one key in the file at `path` and write it back
    ///
    /// Only the stored contents are touched: environment overrides are not
    /// applied and the file is not validated first, so a broken file can be
    /// repaired. A file that does not parse is replaced by the defaults plus
    /// the new value.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, bad values, or if the file cannot be
    /// written
    pub fn update_file(path: &Path, key: &str, value: &str) -> Result<Self> {
        let mut stored = match Self::load_from_path(path) {
            Ok(stored) => stored,
            Err(BridgeError::ConfigParse { message, .. }) => {
                warn!(
                    path = %path.display(),
                    error = %message,
                    "Replacing unreadable settings file"
                );
                Self::default()
            }
            Err(err) => return Err(err),
        };

        stored.set(key, value)?;
        stored.save_to_path(path)?;
        Ok(stored)
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let settings = serde_json::from_str(&contents).map_err(|e| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Save settings to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(std::env::var(LLM_TYPE_ENV).ok());
    }

    fn apply_overrides(&mut self, llm_type: Option<String>) {
        if let Some(llm_type) = llm_type.filter(|v| !v.trim().is_empty()) {
            debug!(llm_type = %llm_type, "llm_type overridden from environment");
            self.llm_type = llm_type;
        }
    }

    /// Check the settings are usable
    ///
    /// # Errors
    ///
    /// Returns an error if `llm_type` is blank
    pub fn validate(&self) -> Result<()> {
        if self.llm_type.trim().is_empty() {
            return Err(BridgeError::ConfigValidation(
                "llm_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Read a setting as a display string
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "llm_type" => Ok(self.llm_type.clone()),
            "tags" => Ok(self.tags.join(",")),
            "verbose" => Ok(self.verbose.to_string()),
            _ => Err(BridgeError::UnknownKey(key.to_string())),
        }
    }

    /// Update a setting from its string form
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or values that do not parse
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "llm_type" => {
                if value.trim().is_empty() {
                    return Err(BridgeError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                self.llm_type = value.to_string();
            }
            "tags" => {
                self.tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(ToString::to_string)
                    .collect();
            }
            "verbose" => {
                self.verbose = value.parse().map_err(|_| BridgeError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
            }
            _ => return Err(BridgeError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// All settings as `(key, value)` pairs
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}
