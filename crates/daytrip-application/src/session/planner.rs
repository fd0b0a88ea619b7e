use daytrip_core::completion::CompletionClient;
use daytrip_core::secret::ApiKey;
use daytrip_core::transcript::Transcript;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a cookie value. Anything that is not a UUID yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side state behind one browser session.
pub struct PlannerSession {
    id: SessionId,
    api_key: Option<ApiKey>,
    client: Option<Arc<dyn CompletionClient>>,
    transcript: Transcript,
    last_preference: Option<String>,
}

impl PlannerSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            api_key: None,
            client: None,
            transcript: Transcript::new(),
            last_preference: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The most recent non-empty preference, used by the retry button.
    pub fn last_preference(&self) -> Option<&str> {
        self.last_preference.as_deref()
    }

    pub(crate) fn install_credential(&mut self, api_key: ApiKey, client: Arc<dyn CompletionClient>) {
        self.api_key = Some(api_key);
        self.client = Some(client);
    }

    pub(crate) fn clear_credential(&mut self) {
        self.api_key = None;
        self.client = None;
    }

    pub(crate) fn client(&self) -> Option<Arc<dyn CompletionClient>> {
        self.client.clone()
    }

    pub(crate) fn remember_preference(&mut self, preference: &str) {
        self.last_preference = Some(preference.to_string());
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }
}

impl fmt::Debug for PlannerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerSession")
            .field("id", &self.id)
            .field("has_api_key", &self.has_api_key())
            .field("transcript_len", &self.transcript.len())
            .finish()
    }
}
