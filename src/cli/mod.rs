//! CLI argument parsing and command routing

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{
    config::{Config, Settings},
    error::Result,
    support::HOST_SUPPORT_ENABLED,
};

/// llm-bridge: inspect how a wrapped language-model client presents itself
#[derive(Debug, Parser)]
#[command(name = "llm-bridge")]
#[command(about = "Inspect llm-bridge settings and host support", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "LLM_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the identity reported to the host and whether host support is built in
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Get a config value
        #[arg(long)]
        get: Option<String>,

        /// Set a config value
        #[arg(long, requires = "value")]
        set: Option<String>,

        /// Value to set (used with --set)
        #[arg(long)]
        value: Option<String>,

        /// List all config values
        #[arg(long)]
        list: bool,
    },

    /// Show version information
    Version,
}

/// Summary printed by `info`
#[derive(Debug, Serialize)]
pub struct Info {
    pub llm_type: String,
    pub tags: Vec<String>,
    pub host_support: bool,
}

impl Info {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            llm_type: settings.llm_type.clone(),
            tags: settings.tags.clone(),
            host_support: HOST_SUPPORT_ENABLED,
        }
    }
}

impl Cli {
    /// Parse CLI arguments from environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Settings file this invocation reads and writes
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::settings_path)
    }

    /// Load settings from [`Self::settings_path`] with environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load_settings(&self) -> Result<Settings> {
        Settings::load_from(&self.settings_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_info_json() {
        let cli = Cli::try_parse_from(["llm-bridge", "info", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info { json: true })));
    }

    #[test]
    fn test_set_requires_value() {
        let result = Cli::try_parse_from(["llm-bridge", "config", "--set", "verbose"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bridge.json");
        let path_arg = path.to_string_lossy().to_string();

        let cli =
            Cli::try_parse_from(["llm-bridge", "--config", path_arg.as_str(), "version"]).unwrap();
        assert_eq!(cli.settings_path(), path);
    }

    #[test]
    fn test_info_reflects_settings() {
        let settings = Settings {
            llm_type: "in-house".to_string(),
            tags: vec!["rag".to_string()],
            verbose: false,
        };
        let info = Info::from_settings(&settings);
        assert_eq!(info.llm_type, "in-house");
        assert_eq!(info.host_support, HOST_SUPPORT_ENABLED);
    }
}
