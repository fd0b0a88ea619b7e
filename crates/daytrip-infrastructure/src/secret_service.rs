//! Secret service implementation.
//!
//! Resolves the optional fallback API key from secret.json, then from the
//! `OPENAI_API_KEY` variable. The variable is read once at construction and
//! never written.

use crate::paths::DaytripPaths;
use crate::storage::{SecretStorage, SecretStorageError};
use daytrip_core::config::SecretConfig;
use daytrip_core::secret::{ApiKey, SecretService};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub struct SecretServiceImpl {
    storage: SecretStorage,
    env_api_key: Option<String>,
}

impl SecretServiceImpl {
    pub fn new(paths: &DaytripPaths) -> Result<Self, SecretStorageError> {
        Ok(Self {
            storage: SecretStorage::new(paths)?,
            env_api_key: std::env::var(API_KEY_ENV).ok(),
        })
    }

    /// Builds the service from explicit parts (for testing).
    pub fn with_storage(storage: SecretStorage, env_api_key: Option<String>) -> Self {
        Self {
            storage,
            env_api_key,
        }
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        match self.storage.load() {
            Ok(config) => Ok(config),
            Err(SecretStorageError::NotFound(_)) => Ok(SecretConfig::default()),
            Err(e) => Err(e.to_string()),
        }
    }

    async fn fallback_api_key(&self) -> Option<ApiKey> {
        match self.load_secrets().await {
            Ok(config) => {
                if let Some(key) = config.openai.and_then(|openai| ApiKey::new(openai.api_key)) {
                    tracing::info!(
                        "[SecretService] Using fallback API key from {}",
                        self.storage.path().display()
                    );
                    return Some(key);
                }
            }
            Err(e) => {
                tracing::warn!("[SecretService] Ignoring unreadable secret file: {}", e);
            }
        }

        let key = self.env_api_key.clone().and_then(ApiKey::new);
        if key.is_some() {
            tracing::info!("[SecretService] Using fallback API key from {}", API_KEY_ENV);
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> SecretStorage {
        SecretStorage::with_path(dir.path().join("secret.json"))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let service = SecretServiceImpl::with_storage(storage_in(&temp_dir), None);

        let config = service.load_secrets().await.unwrap();
        assert!(config.openai.is_none());
        assert!(service.fallback_api_key().await.is_none());
    }

    #[tokio::test]
    async fn test_file_key_wins_over_env() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("secret.json"),
            r#"{"openai": {"api_key": "sk-file"}}"#,
        )
        .unwrap();
        let service =
            SecretServiceImpl::with_storage(storage_in(&temp_dir), Some("sk-env".to_string()));

        let key = service.fallback_api_key().await.unwrap();
        assert_eq!(key.expose(), "sk-file");
    }

    #[tokio::test]
    async fn test_blank_file_key_falls_through_to_env() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("secret.json"),
            r#"{"openai": {"api_key": ""}}"#,
        )
        .unwrap();
        let service =
            SecretServiceImpl::with_storage(storage_in(&temp_dir), Some("sk-env".to_string()));

        assert_eq!(service.fallback_api_key().await.unwrap().expose(), "sk-env");
    }

    #[tokio::test]
    async fn test_invalid_file_reports_error_but_env_still_used() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("secret.json"), "{ nope").unwrap();
        let service =
            SecretServiceImpl::with_storage(storage_in(&temp_dir), Some("sk-env".to_string()));

        assert!(service.load_secrets().await.is_err());
        assert_eq!(service.fallback_api_key().await.unwrap().expose(), "sk-env");
    }
}
