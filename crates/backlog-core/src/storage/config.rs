//! Config file handling
//!
//! `config.json` lives in the platform config directory. A missing or empty
//! file means defaults, which are written out so users have something to edit.
//! Command-line overrides apply on top and are never written back.

use super::write_json;
use crate::models::{Config, ConfigOverrides};
use crate::Result;
use std::path::PathBuf;
use tracing::debug;

const CONFIG_FILE: &str = "config.json";

pub struct ConfigStorage {
    config_dir: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    fn read(&self) -> Result<Option<Config>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn load(&self) -> Result<Config> {
        match self.read()? {
            Some(config) => {
                config.validate()?;
                Ok(config)
            }
            None => {
                debug!("Writing default config to {}", self.path().display());
                let config = Config::default();
                self.save(&config)?;
                Ok(config)
            }
        }
    }

    /// Load the stored config and apply `overrides` to the in-memory copy
    pub fn load_with(&self, overrides: ConfigOverrides) -> Result<Config> {
        let mut config = self.load()?;
        config.apply(overrides)?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        write_json(&self.path(), config)
    }
}
