//! Credential types and the secret service trait.
//!
//! The API key is an explicit value handed to the completion client; nothing
//! in the workspace writes it into the process environment.

use crate::config::SecretConfig;
use std::fmt;

/// The model provider's API key.
///
/// Only presence is validated. `Debug` is redacted so the key never lands in
/// logs through `{:?}` formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for an empty or whitespace-only value.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Exposes the raw key for building the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Service for managing secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secrets are never logged or exposed in error messages
/// - Secrets are loaded from secure locations
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded secrets (possibly empty)
    /// - `Err(String)`: Failed to load (error message should not contain secrets)
    async fn load_secrets(&self) -> Result<SecretConfig, String>;

    /// Resolves the fallback API key, if one is configured anywhere.
    async fn fallback_api_key(&self) -> Option<ApiKey>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_check() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new("   ").is_none());
        assert_eq!(ApiKey::new(" sk-123 ").unwrap().expose(), "sk-123");
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("sk-secret").unwrap();
        assert!(!format!("{key:?}").contains("sk-secret"));
    }
}
