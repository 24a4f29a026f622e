//! Channel and profile config files.
//!
//! Config files live at the paths produced by
//! [`DataDir::config_path`](crate::data_dir::DataDir::config_path). The
//! format follows the file extension: YAML for `.yaml`/`.yml`, JSON for
//! `.json`. Writes go to a `.tmp` sibling first and are renamed into place,
//! so readers never see a partially written config.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::data_dir::DataDir;

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Determine the format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Determine the format of the file at `path`.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))
    }

    fn parse<T: DeserializeOwned>(self, content: &str, path: &Path) -> anyhow::Result<T> {
        match self {
            ConfigFormat::Yaml => serde_yml::from_str(content)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display())),
            ConfigFormat::Json => serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display())),
        }
    }

    fn render<T: Serialize>(self, value: &T) -> anyhow::Result<String> {
        match self {
            ConfigFormat::Yaml => {
                serde_yml::to_string(value).context("Failed to serialize YAML config")
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(value).context("Failed to serialize JSON config")
            }
        }
    }
}

/// Read and parse a config file. A missing file is an error.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: '{}'", path.display()))?;
    let config = format.parse(&content, path)?;
    debug!(path = %path.display(), ?format, "loaded config");
    Ok(config)
}

/// Read a config file, returning `T::default()` if it doesn't exist or is blank.
///
/// Returns an error if the file exists but can't be parsed.
pub fn load_config_or_default<T: DeserializeOwned + Default>(path: &Path) -> anyhow::Result<T> {
    let format = ConfigFormat::from_path(path)?;
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: '{}'", path.display()))?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }

    format.parse(&content, path)
}

/// Write a config file atomically in the format its extension selects.
pub fn save_config<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let format = ConfigFormat::from_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let rendered = format.render(value)?;
    let tmp_path = path.with_extension("tmp");

    std::fs::write(&tmp_path, rendered)
        .with_context(|| format!("Failed to write temp file: {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    debug!(path = %path.display(), ?format, "saved config");
    Ok(())
}

impl DataDir {
    /// Load the config of `channel_id` (or the profile config when `None`)
    /// stored with extension `ext`.
    pub fn load_channel_config<T: DeserializeOwned>(
        &self,
        channel_id: Option<&str>,
        ext: &str,
    ) -> anyhow::Result<T> {
        let path = self.config_path(channel_id, ext)?;
        load_config(&path)
    }

    /// Save the config of `channel_id` (or the profile config when `None`)
    /// with extension `ext`.
    pub fn save_channel_config<T: Serialize>(
        &self,
        channel_id: Option<&str>,
        ext: &str,
        value: &T,
    ) -> anyhow::Result<()> {
        let path = self.config_path(channel_id, ext)?;
        save_config(&path, value)
    }
}
