//! config.toml loading.

use crate::paths::DaytripPaths;
use daytrip_core::DaytripError;
use daytrip_core::config::AppConfig;
use daytrip_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads [`AppConfig`] from a TOML file.
///
/// A missing file is not an error: every setting has a default.
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(paths: &DaytripPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| DaytripError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::info!(
                "[ConfigStorage] No config at {}, using defaults",
                self.path.display()
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Self::validate(&config)?;

        tracing::info!("[ConfigStorage] Loaded config from {}", self.path.display());
        Ok(config)
    }

    fn validate(config: &AppConfig) -> Result<()> {
        if config.model.max_tokens == 0 {
            return Err(DaytripError::config("model.max_tokens must be positive"));
        }
        if !(0.0..=2.0).contains(&config.model.temperature) {
            return Err(DaytripError::config(
                "model.temperature must be between 0.0 and 2.0",
            ));
        }
        if config.server.session_idle_minutes == 0 {
            return Err(DaytripError::config(
                "server.session_idle_minutes must be positive",
            ));
        }
        if config.server.max_sessions == 0 {
            return Err(DaytripError::config("server.max_sessions must be positive"));
        }
        if config.itinerary.city.trim().is_empty() {
            return Err(DaytripError::config("itinerary.city must not be empty"));
        }
        Ok(())
    }
}
