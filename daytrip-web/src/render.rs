//! Page rendering.
//!
//! The planner page is a single minijinja template. Template names ending in
//! `.html` are auto-escaped, so completion text is always inserted as text.

use daytrip_application::{CredentialStatus, PlannerSession, RecommendationOutcome};
use daytrip_core::DaytripError;
use daytrip_core::error::Result;
use daytrip_core::itinerary::ParsedItinerary;
use minijinja::Environment;
use serde::Serialize;

const PAGE_TEMPLATE_NAME: &str = "index.html";
const PAGE_TEMPLATE: &str = include_str!("../templates/index.html");

const KEY_ACCEPTED: &str = "API Key entered successfully.";
const KEY_MISSING: &str = "Please enter your API Key to proceed.";
pub const SESSION_BUSY: &str =
    "Your previous request is still running. Refresh the page in a moment to see it.";

/// One `Morning: …` line on a card.
#[derive(Debug, Clone, Serialize)]
pub struct PlanItem {
    pub label: &'static str,
    pub text: String,
}

/// One "{City} Journey #N" card.
#[derive(Debug, Clone, Serialize)]
pub struct PlanCard {
    pub title: String,
    pub items: Vec<PlanItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseFailureView {
    pub message: String,
    pub raw: String,
    /// Preference resubmitted by the "Try again" button.
    pub retry_preference: Option<String>,
}

/// Everything the page template needs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageView {
    pub city: String,
    pub has_api_key: bool,
    pub key_notice: String,
    pub key_notice_ok: bool,
    pub preference: String,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub plans: Vec<PlanCard>,
    pub parse_failure: Option<ParseFailureView>,
    pub history: String,
}

impl PageView {
    /// View of a session with nothing submitted yet.
    pub fn for_session(city: &str, session: &PlannerSession) -> Self {
        let has_api_key = session.has_api_key();
        Self {
            city: city.to_string(),
            has_api_key,
            key_notice: if has_api_key { KEY_ACCEPTED } else { KEY_MISSING }.to_string(),
            key_notice_ok: has_api_key,
            history: session.transcript().buffer(),
            ..Self::default()
        }
    }

    /// View for a session whose lock is held by an in-flight request. Shows
    /// no key notice or history, since neither can be read yet.
    pub fn busy(city: &str) -> Self {
        Self {
            city: city.to_string(),
            warning: Some(SESSION_BUSY.to_string()),
            ..Self::default()
        }
    }

    pub fn with_credential_status(mut self, status: CredentialStatus) -> Self {
        let accepted = status == CredentialStatus::Accepted;
        self.key_notice = if accepted { KEY_ACCEPTED } else { KEY_MISSING }.to_string();
        self.key_notice_ok = accepted;
        self
    }

    pub fn with_preference(mut self, preference: &str) -> Self {
        self.preference = preference.to_string();
        self
    }

    /// Fills the result area. `retry_preference` is the session's last
    /// submitted preference.
    pub fn with_outcome(mut self, outcome: RecommendationOutcome, retry_preference: Option<&str>) -> Self {
        if let Some(warning) = outcome.warning() {
            self.warning = Some(warning);
            return self;
        }
        match outcome {
            RecommendationOutcome::Itinerary(itinerary) => {
                self.plans = plan_cards(&self.city, &itinerary);
            }
            RecommendationOutcome::ParseFailed { error, raw } => {
                self.parse_failure = Some(ParseFailureView {
                    message: format!("The suggestions came back in an unexpected shape. {error}"),
                    raw,
                    retry_preference: retry_preference.map(str::to_string),
                });
            }
            RecommendationOutcome::ProviderFailed(e) => {
                self.error = Some(format!("Could not get recommendations: {e}"));
            }
            RecommendationOutcome::MissingCredential | RecommendationOutcome::EmptyPreference => {}
        }
        self
    }
}

fn plan_cards(city: &str, itinerary: &ParsedItinerary) -> Vec<PlanCard> {
    itinerary
        .plans()
        .iter()
        .enumerate()
        .map(|(index, plan)| PlanCard {
            title: format!("{city} Journey #{}", index + 1),
            items: plan
                .sections()
                .map(|(part, text)| PlanItem {
                    label: part.title(),
                    text: text.to_string(),
                })
                .collect(),
        })
        .collect()
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
            .map_err(|e| DaytripError::template(e.to_string()))?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &PageView) -> Result<String> {
        self.env
            .get_template(PAGE_TEMPLATE_NAME)
            .and_then(|template| template.render(view))
            .map_err(|e| DaytripError::template(e.to_string()))
    }
}
