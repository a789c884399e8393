//! Configuration management for modpatch CLI

use anyhow::{Context, Result};
use modpatch::PatchOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::OptionArgs;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency_name: Option<String>,
    pub assets_dir: Option<PathBuf>,
    pub palette: Option<String>,
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("modpatch");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Store every setting given on the command line
    pub fn update(&mut self, settings: OptionArgs) -> bool {
        let mut changed = false;
        if let Some(name) = settings.currency_name {
            self.currency_name = Some(name);
            changed = true;
        }
        if let Some(dir) = settings.assets_dir {
            self.assets_dir = Some(dir);
            changed = true;
        }
        if let Some(palette) = settings.palette {
            self.palette = Some(palette);
            changed = true;
        }
        if let Some(dir) = settings.cache_dir {
            self.cache_dir = Some(dir);
            changed = true;
        }
        changed
    }

    /// Patch options from this config, with command-line flags taking precedence
    pub fn patch_options(&self, overrides: &OptionArgs) -> PatchOptions {
        let defaults = PatchOptions::default();
        PatchOptions {
            currency_name: overrides
                .currency_name
                .clone()
                .or_else(|| self.currency_name.clone())
                .unwrap_or(defaults.currency_name),
            assets_dir: overrides
                .assets_dir
                .clone()
                .or_else(|| self.assets_dir.clone()),
            palette: overrides
                .palette
                .clone()
                .or_else(|| self.palette.clone())
                .unwrap_or(defaults.palette),
        }
    }

    /// Directory for work directories: flag, then config, then the user cache dir
    pub fn cache_dir(&self, overrides: &OptionArgs) -> Result<PathBuf> {
        if let Some(dir) = overrides.cache_dir.as_ref().or(self.cache_dir.as_ref()) {
            return Ok(dir.clone());
        }
        Ok(dirs::cache_dir()
            .context("Could not determine cache directory")?
            .join("modpatch"))
    }
}
