// File: src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::Storage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Config {
    /// Overrides the default task file location (`<data_dir>/tasks.txt`).
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Command aliases seeded into the parser at session start,
    /// e.g. `dl = "deadline"`. Aliases registered at the prompt are
    /// session-only and are not written back here.
    #[serde(default)]
    pub command_aliases: HashMap<String, String>,
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    ///
    /// A missing file yields the defaults; an unreadable or unparseable file
    /// is a contextualized error so the caller can decide what to do.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        Storage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            Storage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// The task file this configuration points at.
    pub fn task_file_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => ctx.get_task_file_path(),
        }
    }
}
