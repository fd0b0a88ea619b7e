//! Read-only access to secret.json.

use crate::paths::DaytripPaths;
use daytrip_core::config::SecretConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretStorageError {
    #[error("Secret file not found at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // serde_json errors carry only line/column, never the offending value.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine the config directory")]
    ConfigDirNotFound,
}

/// Loads the optional fallback credential. Never writes the file.
#[derive(Debug, Clone)]
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn new(paths: &DaytripPaths) -> Result<Self, SecretStorageError> {
        let path = paths
            .secret_file()
            .map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SecretStorageError::NotFound(self.path.clone())
            } else {
                SecretStorageError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|source| SecretStorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");

        match SecretStorage::with_path(&path).load() {
            Err(SecretStorageError::NotFound(missing)) => assert_eq!(missing, path),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_reads_key_and_model() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(
            &path,
            r#"{ "openai": { "api_key": "sk-123", "model_name": "gpt-4o" } }"#,
        )
        .unwrap();

        let openai = SecretStorage::with_path(&path).load().unwrap().openai.unwrap();
        assert_eq!(openai.api_key, "sk-123");
        assert_eq!(openai.model_name.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn test_empty_object_has_no_openai_section() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, "{}").unwrap();

        assert!(SecretStorage::with_path(&path).load().unwrap().openai.is_none());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, r#"{ "openai": "#).unwrap();

        let err = SecretStorage::with_path(&path).load().unwrap_err();
        assert!(matches!(err, SecretStorageError::Parse { .. }));
        assert!(err.to_string().contains("secret.json"));
    }
}
