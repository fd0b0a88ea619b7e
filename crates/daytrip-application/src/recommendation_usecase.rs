//! Recommendation use case.
//!
//! Turns one preference submission into an itinerary:
//! prompt builder → completion client → transcript → parser.

use crate::session::{PlannerSession, SessionId, SessionStore};
use daytrip_core::DaytripError;
use daytrip_core::completion::{CompletionClientFactory, CompletionError, CompletionRequest};
use daytrip_core::config::ModelConfig;
use daytrip_core::error::Result;
use daytrip_core::itinerary::{self, ParseError, ParsedItinerary};
use daytrip_core::preference::Preference;
use daytrip_core::secret::ApiKey;
use daytrip_interaction::PromptBuilder;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of [`RecommendationService::set_api_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Accepted,
    Missing,
}

/// What the page should show after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    /// No API key on the session; no call was made.
    MissingCredential,
    /// The preference was blank; no call was made.
    EmptyPreference,
    /// The provider call failed. Nothing was recorded.
    ProviderFailed(CompletionError),
    /// The completion arrived but did not have the expected shape.
    ParseFailed { error: ParseError, raw: String },
    Itinerary(ParsedItinerary),
}

impl RecommendationOutcome {
    /// User-facing warning text for the outcomes that never reach the model.
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::MissingCredential => Some(DaytripError::MissingCredential.to_string()),
            Self::EmptyPreference => Some(DaytripError::EmptyPreference.to_string()),
            _ => None,
        }
    }

    pub fn itinerary(&self) -> Option<&ParsedItinerary> {
        match self {
            Self::Itinerary(itinerary) => Some(itinerary),
            _ => None,
        }
    }
}

/// Orchestrates planner sessions and recommendation requests.
///
/// # Thread Safety
///
/// The service is shared behind an `Arc`. Callers lock one session at a time
/// and pass the guard's contents into [`Self::recommend`], so a session never
/// runs two recommendations concurrently.
pub struct RecommendationService {
    sessions: SessionStore,
    client_factory: Arc<dyn CompletionClientFactory>,
    prompt_builder: PromptBuilder,
    temperature: f32,
    max_tokens: u32,
    /// Seeded into every new session when configured.
    fallback_api_key: Option<ApiKey>,
}

impl RecommendationService {
    pub fn new(
        client_factory: Arc<dyn CompletionClientFactory>,
        prompt_builder: PromptBuilder,
        model: &ModelConfig,
        fallback_api_key: Option<ApiKey>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            client_factory,
            prompt_builder,
            temperature: model.temperature,
            max_tokens: model.max_tokens,
            fallback_api_key,
        }
    }

    /// Replaces the default session store, e.g. to apply configured limits.
    pub fn with_session_store(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn city(&self) -> &str {
        self.prompt_builder.city()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Looks up the caller's session, creating one (seeded with the fallback
    /// key, if any) when the id is missing or unknown.
    pub async fn open_session(
        &self,
        id: Option<SessionId>,
    ) -> (SessionId, Arc<Mutex<PlannerSession>>) {
        self.sessions
            .get_or_create(id, |new_id| {
                let mut session = PlannerSession::new(new_id);
                if let Some(key) = &self.fallback_api_key {
                    session.install_credential(key.clone(), self.client_factory.create(key));
                }
                session
            })
            .await
    }

    /// Stores or clears the session's API key. Only presence is checked.
    pub fn set_api_key(&self, session: &mut PlannerSession, raw: &str) -> CredentialStatus {
        match ApiKey::new(raw) {
            Some(key) => {
                let client = self.client_factory.create(&key);
                session.install_credential(key, client);
                tracing::info!(session_id = %session.id(), "[RecommendationService] API key set");
                CredentialStatus::Accepted
            }
            None => {
                session.clear_credential();
                tracing::info!(session_id = %session.id(), "[RecommendationService] API key cleared");
                CredentialStatus::Missing
            }
        }
    }

    /// Runs one recommendation for the session.
    ///
    /// Warnings and provider/parse failures come back as outcomes. `Err` is
    /// reserved for internal failures such as a broken prompt template.
    pub async fn recommend(
        &self,
        session: &mut PlannerSession,
        raw_preference: &str,
    ) -> Result<RecommendationOutcome> {
        let Some(client) = session.client() else {
            tracing::warn!(session_id = %session.id(), "[RecommendationService] No API key");
            return Ok(RecommendationOutcome::MissingCredential);
        };

        let preference = match Preference::new(raw_preference) {
            Ok(preference) => preference,
            Err(DaytripError::EmptyPreference) => {
                tracing::warn!(session_id = %session.id(), "[RecommendationService] Empty preference");
                return Ok(RecommendationOutcome::EmptyPreference);
            }
            Err(e) => return Err(e),
        };
        session.remember_preference(preference.as_str());

        let prompt = self.prompt_builder.build(&preference)?;
        tracing::debug!(prompt = %prompt, "[RecommendationService] Built prompt");

        let request = CompletionRequest {
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let completion = match client.complete(&request).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::error!(
                    session_id = %session.id(),
                    "[RecommendationService] Completion failed: {}",
                    e
                );
                return Ok(RecommendationOutcome::ProviderFailed(e));
            }
        };
        tracing::debug!(completion = %completion, "[RecommendationService] Received completion");

        session
            .transcript_mut()
            .append(preference.as_str(), completion.as_str());

        match itinerary::parse(&completion) {
            Ok(parsed) => {
                tracing::info!(session_id = %session.id(), "[RecommendationService] Itinerary ready");
                Ok(RecommendationOutcome::Itinerary(parsed))
            }
            Err(error) => {
                tracing::warn!(
                    session_id = %session.id(),
                    "[RecommendationService] Could not parse completion: {}",
                    error
                );
                Ok(RecommendationOutcome::ParseFailed {
                    error,
                    raw: completion,
                })
            }
        }
    }
}
