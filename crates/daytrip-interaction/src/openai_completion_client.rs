//! OpenAiCompletionClient - Direct REST implementation of the completion seam.
//!
//! Calls the OpenAI Chat Completions API with a single user message. The API
//! key is supplied by the caller at construction time.

use async_trait::async_trait;
use daytrip_core::completion::{
    CompletionClient, CompletionClientFactory, CompletionError, CompletionRequest,
};
use daytrip_core::config::ModelConfig;
use daytrip_core::secret::ApiKey;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Client implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiCompletionClient {
    client: Client,
    api_key: ApiKey,
    model: String,
    endpoint: String,
}

impl OpenAiCompletionClient {
    /// Creates a client for the given key, model and API base URL
    /// (e.g. `https://api.openai.com/v1`).
    pub fn new(api_key: ApiKey, model: impl Into<String>, base_url: &str) -> Self {
        Self::with_client(Client::new(), api_key, model, base_url)
    }

    /// Same as [`Self::new`] but reuses an existing connection pool.
    pub fn with_client(
        client: Client,
        api_key: ApiKey,
        model: impl Into<String>,
        base_url: &str,
    ) -> Self {
        Self {
            client,
            api_key,
            model: model.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(body)
            .send()
            .await
            .map_err(|err| CompletionError::Network(format!("OpenAI API request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            CompletionError::InvalidResponse(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            "[OpenAiCompletionClient] Sending completion request"
        );

        let text = self.send_request(&body).await?;

        tracing::debug!(
            chars = text.len(),
            "[OpenAiCompletionClient] Received completion"
        );
        Ok(text)
    }
}

/// Builds [`OpenAiCompletionClient`]s sharing one connection pool.
#[derive(Clone)]
pub struct OpenAiClientFactory {
    client: Client,
    model: String,
    base_url: String,
}

impl OpenAiClientFactory {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            client: Client::new(),
            model: config.name.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

impl CompletionClientFactory for OpenAiClientFactory {
    fn create(&self, api_key: &ApiKey) -> Arc<dyn CompletionClient> {
        Arc::new(OpenAiCompletionClient::with_client(
            self.client.clone(),
            api_key.clone(),
            self.model.clone(),
            &self.base_url,
        ))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(CompletionError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> CompletionError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CompletionError::Authentication(message)
        }
        StatusCode::TOO_MANY_REQUESTS => CompletionError::QuotaExceeded(message),
        _ => CompletionError::Provider {
            status: status.as_u16(),
            message,
        },
    }
}
