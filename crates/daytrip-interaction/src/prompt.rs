//! Preference prompt builder.
//!
//! The response-format block spells out the exact labels the itinerary parser
//! anchors on; changing one side without the other breaks parsing.

use daytrip_core::DaytripError;
use daytrip_core::error::Result;
use daytrip_core::preference::Preference;
use minijinja::{Environment, context};

const PLAN_TEMPLATE_NAME: &str = "plan";

const PLAN_TEMPLATE: &str = r#"Create two distinct itineraries for a full day in {{ city }} based on these preferences: {{ preferences }}.
Format each plan with clear sections for morning, afternoon, evening, and night activities.
For each section, provide one recommended activity or location, suitable for the time of day, and ensure all locations are within a reasonable travel distance from each other.
The activities should be related to music, art, sports, and include dining options.
The response format should be:
Itinerary 1:
Morning: [Activity/Location]
Afternoon: [Activity/Location]
Evening: [Activity/Location]
Night: [Activity/Location]
Itinerary 2:
Morning: [Activity/Location]
Afternoon: [Activity/Location]
Evening: [Activity/Location]
Night: [Activity/Location]
Please provide diverse, engaging, and memorable suggestions for each part of the day. For each activity, make sentences as short as possible."#;

/// Fills the fixed itinerary instruction with a user's preference.
pub struct PromptBuilder {
    env: Environment<'static>,
    city: String,
}

impl PromptBuilder {
    pub fn new(city: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(PLAN_TEMPLATE_NAME, PLAN_TEMPLATE)
            .map_err(|e| DaytripError::template(e.to_string()))?;
        Ok(Self {
            env,
            city: city.into(),
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Renders the instruction text sent to the model.
    pub fn build(&self, preference: &Preference) -> Result<String> {
        let template = self
            .env
            .get_template(PLAN_TEMPLATE_NAME)
            .map_err(|e| DaytripError::template(e.to_string()))?;
        template
            .render(context! {
                city => &self.city,
                preferences => preference.as_str(),
            })
            .map_err(|e| DaytripError::template(e.to_string()))
    }
}
