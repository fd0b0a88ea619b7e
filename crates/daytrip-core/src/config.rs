//! Configuration models for config.toml and secret.json.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_CITY: &str = "Baku";
pub const DEFAULT_SESSION_IDLE_MINUTES: u32 = 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Root of config.toml. Every table and field is optional in the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub itinerary: ItineraryConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Planner sessions unseen for this long are dropped with their history.
    pub session_idle_minutes: u32,
    /// Upper bound on live planner sessions.
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Completion endpoint settings. Temperature and token budget are fixed per
/// process; users cannot change them from the page.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ItineraryConfig {
    /// Destination the prompt asks the model to plan for.
    pub city: String,
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
        }
    }
}

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiSecret>,
}

/// OpenAI API configuration
#[derive(Clone, Deserialize)]
pub struct OpenAiSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl std::fmt::Debug for OpenAiSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSecret")
            .field("api_key", &"****")
            .field("model_name", &self.model_name)
            .finish()
    }
}
