//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use super::error::ConfigError;

const SEED_DEMO_VAR: &str = "ERBUILDER_SEED_DEMO";
const PRETTY_SNAPSHOT_VAR: &str = "ERBUILDER_PRETTY_SNAPSHOT";
const SNAPSHOT_LABEL_VAR: &str = "ERBUILDER_SNAPSHOT_LABEL";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Start from the three-table demo diagram instead of an empty canvas
    pub seed_demo: bool,

    /// Pretty-print the JSON written by a save
    pub pretty_snapshot: bool,

    /// Tag attached to the save log line
    /// Example: sprint-review
    pub snapshot_label: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup (the environment, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let seed_demo = match lookup(SEED_DEMO_VAR) {
            Some(value) => parse_bool(SEED_DEMO_VAR, &value)?,
            None => true,
        };
        let pretty_snapshot = match lookup(PRETTY_SNAPSHOT_VAR) {
            Some(value) => parse_bool(PRETTY_SNAPSHOT_VAR, &value)?,
            None => false,
        };
        let snapshot_label = lookup(SNAPSHOT_LABEL_VAR).filter(|v| !v.trim().is_empty());

        Ok(Self {
            seed_demo,
            pretty_snapshot,
            snapshot_label,
        })
    }

    /// Check if a snapshot label is configured
    pub fn has_snapshot_label(&self) -> bool {
        self.snapshot_label.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_demo: true,
            pretty_snapshot: false,
            snapshot_label: None,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
