//! # next-subnet Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads the optional configuration for next-subnet. Only the
//! remote inventory lookup is configurable: which executable to run, how long
//! to wait for it, and whether to run it at all. The five positional
//! arguments are never read from configuration.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags, or their `NEXT_SUBNET_*` environment fallbacks
//! 2. The file named by `--config` / `NEXT_SUBNET_CONFIG` (must exist), or else
//!    the per-user `config.toml` in the platform config directory (optional)
//! 3. Default values defined in the code
//!
//! After merging, the inventory command is tilde-expanded and the result is
//! validated before use.
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! [inventory]
//! command = "~/google-cloud-sdk/bin/gcloud"
//! timeout_secs = 15
//! enabled = true
//! ```
//!
//! Loading configuration:
//!
//! ```rust
//! let cfg = config::load_config(&overrides)?;
//! let timeout = cfg.inventory.timeout();
//! ```
//!
use crate::core::error::{SubnetError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub inventory: InventoryConfig,
}

/// Settings for the remote subnet inventory (`gcloud compute networks subnets list`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InventoryConfig {
    /// Executable to run (can use ~). Will be expanded.
    #[serde(default = "default_inventory_command")]
    pub command: String,
    /// Seconds to wait before the query is abandoned.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Set to false to allocate from the local record alone.
    #[serde(default = "default_inventory_enabled")]
    pub enabled: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            command: default_inventory_command(),
            timeout_secs: default_timeout_secs(),
            enabled: default_inventory_enabled(),
        }
    }
}

impl InventoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_inventory_command() -> String {
    "gcloud".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_inventory_enabled() -> bool {
    true
}

/// Values taken from the command line that win over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub inventory_command: Option<String>,
    pub timeout_secs: Option<u64>,
    pub no_remote: bool,
}

pub fn load_config(overrides: &ConfigOverrides) -> Result<Config> {
    let file_config = match &overrides.config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(SubnetError::Config(format!(
                    "Config file '{}' does not exist or is not a file.",
                    path.display()
                ))));
            }
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => load_user_config()?,
    };
    let mut config = apply_overrides(file_config.unwrap_or_default(), overrides);
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "NextSubnet", "next-subnet") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content).map_err(|e| {
        anyhow!(SubnetError::Config(format!(
            "Failed to parse TOML from file {}: {}",
            path.display(),
            e
        )))
    })
}

fn apply_overrides(mut config: Config, overrides: &ConfigOverrides) -> Config {
    if let Some(command) = &overrides.inventory_command {
        config.inventory.command = command.clone();
    }
    if let Some(secs) = overrides.timeout_secs {
        config.inventory.timeout_secs = secs;
    }
    if overrides.no_remote {
        config.inventory.enabled = false;
    }
    config
}

fn expand_config_paths(config: &mut Config) {
    config.inventory.command = shellexpand::tilde(&config.inventory.command).into_owned();
    debug!("Expanded inventory command: {}", config.inventory.command);
}

fn validate_config(config: &Config) -> Result<()> {
    if config.inventory.command.trim().is_empty() {
        return Err(anyhow!(SubnetError::Config(
            "inventory.command cannot be empty.".to_string()
        )));
    }
    if config.inventory.timeout_secs == 0 {
        return Err(anyhow!(SubnetError::Config(
            "inventory.timeout_secs must be greater than zero.".to_string()
        )));
    }
    Ok(())
}
