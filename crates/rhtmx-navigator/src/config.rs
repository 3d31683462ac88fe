// File: src/config.rs
// Purpose: Navigator configuration parsing from navigator.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Navigator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NavigatorConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Navigation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// State used by `Navigator::start` when the store holds nothing (default: "")
    #[serde(default)]
    pub initial_state: String,

    /// Whether one trailing `/` is stripped before committing (default: true)
    #[serde(default = "default_true")]
    pub strip_trailing_slash: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_state: String::new(),
            strip_trailing_slash: default_true(),
        }
    }
}

impl NavigatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./navigator.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("navigator.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
