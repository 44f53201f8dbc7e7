use anyhow::{Context, Result};
use ninekit::{BackendConfig, DEFAULT_PROGRAM};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::sudo::SudoConfig;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("ninectl"))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(path).with_context(|| format!("Could not expand path '{path}'"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tool: ToolConfig,
    pub sudo: SudoConfig,
}

/// `[tool]` section: where nine-manage-vhosts lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Program name looked up in the well-known locations and PATH
    pub program: String,
    /// Explicit path, skips discovery
    pub path: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            path: None,
        }
    }
}

impl Config {
    /// Load the config
    ///
    /// An explicit path must exist. The default path is optional; without
    /// it the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = default_config_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("no config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load a config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Backend settings for the authority client
    pub fn backend_config(&self) -> Result<BackendConfig> {
        let path = self.tool.path.as_deref().map(expand_path).transpose()?;

        Ok(BackendConfig {
            program: self.tool.program.clone(),
            path,
            elevation: self.sudo.elevation(),
        })
    }
}
