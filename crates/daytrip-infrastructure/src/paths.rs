//! Path management for daytrip configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/daytrip/           # Config directory
//! ├── config.toml              # Server, model and itinerary settings
//! ├── secret.json              # Optional fallback API key
//! └── logs/                    # Application logs
//!     └── daytrip-web.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "daytrip";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot find the platform config directory")]
    ConfigDirNotFound,
}

/// Resolves daytrip paths, optionally under an explicit base directory.
///
/// With no base, paths live under the platform config directory
/// (`~/.config/daytrip` on Linux).
#[derive(Debug, Clone)]
pub struct DaytripPaths {
    base: Option<PathBuf>,
}

impl DaytripPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the daytrip configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to secret.json.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the log directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for DaytripPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
