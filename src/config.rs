use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration for the time-tracking service connection.
///
/// Both fields default to empty until the user fills them in. The token is
/// opaque: it is stored and sent exactly as entered, with no validation or
/// re-encoding.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SyncConfig {
    #[serde(default)]
    pub service_url: String,
    #[serde(default)]
    pub service_token: String,
}

/// On-disk store for [`SyncConfig`]. `load` merges whatever is persisted
/// over the defaults; each field edit saves immediately.
pub struct SettingsStore {
    file_path: PathBuf,
}

impl SettingsStore {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<SyncConfig> {
        if !self.file_path.exists() {
            info!(
                "No settings file at {}, using defaults",
                self.file_path.display()
            );
            return Ok(SyncConfig::default());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("reading {}", self.file_path.display()))?;
        let config: SyncConfig = toml::from_str(&content)
            .with_context(|| format!("parsing {}", self.file_path.display()))?;
        Ok(config)
    }

    pub fn save(&self, config: &SyncConfig) -> Result<()> {
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("writing {}", self.file_path.display()))?;
        Ok(())
    }

    /// Update the endpoint and persist in one step.
    pub fn set_service_url(&self, config: &mut SyncConfig, value: String) -> Result<()> {
        config.service_url = value;
        self.save(config)
    }

    /// Update the credential and persist in one step.
    pub fn set_service_token(&self, config: &mut SyncConfig, value: String) -> Result<()> {
        config.service_token = value;
        self.save(config)
    }
}
