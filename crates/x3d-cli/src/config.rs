//! Configuration for the command-line front end

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use x3d_core::{ExportOptions, SchemaCatalog};

use crate::error::CliError;

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Command-line configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// User schema table merged over the builtin catalog
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// XML-escape attribute values on output
    #[serde(default = "default_true")]
    pub escape_values: bool,
    /// Write attributes even when they equal their default
    #[serde(default)]
    pub include_defaults: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            catalog_path: None,
            escape_values: true,
            include_defaults: false,
        }
    }
}

impl CliConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            escape_values: self.escape_values,
            include_defaults: self.include_defaults,
        }
    }
}

/// Loads, saves, and hands out the CLI configuration
pub struct ConfigManager {
    config: CliConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Load from `path`, or from the OS-standard location when `None`
    pub fn new(path: Option<PathBuf>) -> Self {
        let config_path = path.unwrap_or_else(Self::default_path);
        let config = Self::load_from_path(&config_path).unwrap_or_else(|| {
            tracing::info!("No config file found, using defaults");
            CliConfig::default()
        });

        Self {
            config,
            config_path,
        }
    }

    /// `<config dir>/x3d-bind/config.ron`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("x3d-bind")
            .join("config.ron")
    }

    fn load_from_path(path: &Path) -> Option<CliConfig> {
        let content = std::fs::read_to_string(path).ok()?;
        match ron::from_str(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn config_mut(&mut self) -> &mut CliConfig {
        &mut self.config
    }

    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// Serialize the current configuration as pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Write the configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let content = self.to_ron_string()?;
        std::fs::write(&self.config_path, content).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    /// Builtin catalog, with the configured user table merged over it
    pub fn catalog(&self) -> Result<SchemaCatalog, CliError> {
        let mut catalog = SchemaCatalog::builtin();
        if let Some(path) = &self.config.catalog_path {
            catalog.merge(SchemaCatalog::load(path)?);
        }
        Ok(catalog)
    }
}
