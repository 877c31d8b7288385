//! Configuration for the transit graph
//!
//! Track costs and logging settings, loaded from TOML with defaults for
//! every field.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};
use crate::constants::{BRANCH_COST, DEFAULT_LOG_LEVEL, EXPRESS_COST, LOOP_COST, MAIN_COST, TRANSFER_COST};
use crate::core::error::{Error, Result};
use crate::types::TrackKind;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base traversal cost per track kind
    #[serde(default)]
    pub costs: TrackCosts,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Base traversal cost per track kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCosts {
    /// Cost of a main line track
    #[serde(default = "default_main")]
    pub main: u32,

    /// Cost of a branch line track
    #[serde(default = "default_branch")]
    pub branch: u32,

    /// Cost of an express track
    #[serde(default = "default_express")]
    pub express: u32,

    /// Cost of a loop track
    #[serde(default = "default_loop")]
    pub r#loop: u32,

    /// Cost of a transfer track
    #[serde(default = "default_transfer")]
    pub transfer: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit span targets in log lines
    #[serde(default)]
    pub with_target: bool,
}

impl TrackCosts {
    /// Cost of traversing a track of `kind`
    pub fn cost_of(&self, kind: TrackKind) -> u32 {
        match kind {
            TrackKind::Main => self.main,
            TrackKind::Branch => self.branch,
            TrackKind::Express => self.express,
            TrackKind::Loop => self.r#loop,
            TrackKind::Transfer => self.transfer,
        }
    }

    /// Check the costs keep express tracks a shortcut.
    ///
    /// Line and loop tracks must cost something, and an express track may
    /// not cost more than an ordinary line hop.
    pub fn validate(&self) -> Result<()> {
        for (name, cost) in [("main", self.main), ("branch", self.branch), ("loop", self.r#loop)] {
            if cost == 0 {
                return Err(Error::config(format!("{} track cost must be positive", name)));
            }
        }
        if self.express > self.main.min(self.branch) {
            return Err(Error::config(format!(
                "express cost {} exceeds line cost {}",
                self.express,
                self.main.min(self.branch)
            )));
        }
        Ok(())
    }
}

impl Default for TrackCosts {
    fn default() -> Self {
        Self {
            main: default_main(),
            branch: default_branch(),
            express: default_express(),
            r#loop: default_loop(),
            transfer: default_transfer(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            with_target: false,
        }
    }
}

// Default value functions for serde
fn default_main() -> u32 { MAIN_COST }
fn default_branch() -> u32 { BRANCH_COST }
fn default_express() -> u32 { EXPRESS_COST }
fn default_loop() -> u32 { LOOP_COST }
fn default_transfer() -> u32 { TRANSFER_COST }
fn default_level() -> String { DEFAULT_LOG_LEVEL.to_string() }

impl Config {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.costs.validate()?;
        Ok(config)
    }
}

/// Load configuration from file
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = std::fs::read_to_string(path)?;
    Config::from_toml_str(&config_str)
}

/// Load configuration from file or use defaults
pub fn load_config_or_default(path: Option<&str>) -> Config {
    match path {
        Some(path) => {
            match load_config(path) {
                Ok(config) => {
                    info!("Loaded configuration from: {}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to load config from {}: {}. Using defaults.", path, e);
                    Config::default()
                }
            }
        }
        None => {
            info!("No config file specified, using defaults");
            Config::default()
        }
    }
}
