//! Wires configuration, secrets and services into an [`AppState`].

use crate::state::AppState;
use anyhow::{Context, Result};
use daytrip_application::{RecommendationService, SessionStore};
use daytrip_core::config::AppConfig;
use daytrip_core::secret::SecretService;
use daytrip_interaction::{OpenAiClientFactory, PromptBuilder};
use std::sync::Arc;

pub async fn bootstrap(config: &AppConfig, secret_service: &dyn SecretService) -> Result<AppState> {
    let mut model = config.model.clone();
    match secret_service.load_secrets().await {
        Ok(secrets) => {
            if let Some(name) = secrets.openai.and_then(|openai| openai.model_name) {
                tracing::info!("[Bootstrap] Using model '{}' from secret.json", name);
                model.name = name;
            }
        }
        Err(e) => tracing::warn!("[Bootstrap] Could not read secret.json: {}", e),
    }

    let fallback_api_key = secret_service.fallback_api_key().await;
    if fallback_api_key.is_none() {
        tracing::info!("[Bootstrap] No fallback API key; users must enter one");
    }

    let prompt_builder =
        PromptBuilder::new(config.itinerary.city.clone()).context("Failed to build prompt template")?;
    let client_factory = Arc::new(OpenAiClientFactory::new(&model));

    let service = Arc::new(
        RecommendationService::new(client_factory, prompt_builder, &model, fallback_api_key)
            .with_session_store(SessionStore::from_config(&config.server)),
    );

    tracing::info!(
        "[Bootstrap] Planner ready (city: {}, model: {}, max sessions: {})",
        config.itinerary.city,
        model.name,
        config.server.max_sessions
    );

    AppState::new(service).context("Failed to build page renderer")
}
