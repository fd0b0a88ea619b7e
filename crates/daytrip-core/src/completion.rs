//! Completion client seam.
//!
//! The application layer talks to the model provider only through these
//! traits; `daytrip-interaction` supplies the HTTP implementation.

use crate::secret::ApiKey;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// One outbound completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Provider-level failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The provider rejected the credential (401/403).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit or billing quota reached (429).
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The request never got a response (connect, TLS, timeout, IO).
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success status.
    #[error("Provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    /// The response carried no text.
    #[error("The model returned no content")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Sends a prompt and returns the raw completion text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// Builds a client bound to a specific credential.
pub trait CompletionClientFactory: Send + Sync {
    fn create(&self, api_key: &ApiKey) -> Arc<dyn CompletionClient>;
}
