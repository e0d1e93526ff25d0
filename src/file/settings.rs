// src/file/settings.rs
use super::FileHandler;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub struct SettingsFileHandler;

impl SettingsFileHandler {
    pub fn new() -> Self {
        Self
    }

    /// Writes the given settings if no file exists yet. Returns whether a
    /// file was created.
    pub fn ensure(&self, defaults: &AppConfig, path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        self.save(defaults, path)?;
        Ok(true)
    }
}

impl FileHandler<AppConfig> for SettingsFileHandler {
    fn load(&self, path: &Path) -> Result<AppConfig> {
        let content = fs::read_to_string(path)?;
        ron::from_str(&content).context("Failed to parse settings file")
    }

    fn save(&self, data: &AppConfig, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(
            data,
            ron::ser::PrettyConfig::new()
                .new_line("\n".to_string())
                .depth_limit(4)
        )?;
        fs::write(path, content)?;
        Ok(())
    }
}
