//! Itinerary domain types.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Number of itineraries a completion is expected to contain.
pub const ITINERARY_COUNT: u8 = 2;

/// One of the four fixed sections of a day, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    /// All day parts in the order they appear in a completion.
    pub const ALL: [DayPart; 4] = [
        DayPart::Morning,
        DayPart::Afternoon,
        DayPart::Evening,
        DayPart::Night,
    ];

    /// The label introducing the section, as the model writes it.
    pub fn label(self) -> &'static str {
        match self {
            DayPart::Morning => "Morning:",
            DayPart::Afternoon => "Afternoon:",
            DayPart::Evening => "Evening:",
            DayPart::Night => "Night:",
        }
    }

    /// The literal the parser splits on to find the start of this section.
    ///
    /// `Afternoon` and `Evening` carry a trailing space; `Night` does not.
    pub fn anchor(self) -> &'static str {
        match self {
            DayPart::Morning => "Morning:",
            DayPart::Afternoon => "Afternoon: ",
            DayPart::Evening => "Evening: ",
            DayPart::Night => "Night:",
        }
    }

    /// Lowercase slug used in itinerary keys.
    pub fn slug(self) -> &'static str {
        match self {
            DayPart::Morning => "morning",
            DayPart::Afternoon => "afternoon",
            DayPart::Evening => "evening",
            DayPart::Night => "night",
        }
    }

    /// Display title without the colon ("Morning").
    pub fn title(self) -> &'static str {
        self.label().trim_end_matches(':')
    }
}

/// Identifies one of the eight slots, e.g. `itinerary_1_morning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItineraryKey {
    pub itinerary: u8,
    pub part: DayPart,
}

impl ItineraryKey {
    pub fn new(itinerary: u8, part: DayPart) -> Self {
        Self { itinerary, part }
    }

    /// All eight keys in (itinerary, day-part) order.
    pub fn all() -> impl Iterator<Item = ItineraryKey> {
        (1..=ITINERARY_COUNT)
            .flat_map(|index| DayPart::ALL.into_iter().map(move |part| Self::new(index, part)))
    }
}

impl fmt::Display for ItineraryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "itinerary_{}_{}", self.itinerary, self.part.slug())
    }
}

/// The four activity descriptions of one itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayPlan {
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
    pub night: String,
}

impl DayPlan {
    pub fn get(&self, part: DayPart) -> &str {
        match part {
            DayPart::Morning => &self.morning,
            DayPart::Afternoon => &self.afternoon,
            DayPart::Evening => &self.evening,
            DayPart::Night => &self.night,
        }
    }

    pub(crate) fn slot_mut(&mut self, part: DayPart) -> &mut String {
        match part {
            DayPart::Morning => &mut self.morning,
            DayPart::Afternoon => &mut self.afternoon,
            DayPart::Evening => &mut self.evening,
            DayPart::Night => &mut self.night,
        }
    }

    /// `(part, text)` pairs in day order.
    pub fn sections(&self) -> impl Iterator<Item = (DayPart, &str)> {
        DayPart::ALL.into_iter().map(move |part| (part, self.get(part)))
    }
}

/// A fully decomposed completion: two itineraries of four sections each.
///
/// Only [`crate::itinerary::parse`] constructs this, so every slot is
/// non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItinerary {
    plans: [DayPlan; ITINERARY_COUNT as usize],
}

impl ParsedItinerary {
    pub(crate) fn from_plans(plans: [DayPlan; ITINERARY_COUNT as usize]) -> Self {
        Self { plans }
    }

    /// Returns the plan for a 1-based itinerary index.
    pub fn plan(&self, itinerary: u8) -> Option<&DayPlan> {
        let index = usize::from(itinerary).checked_sub(1)?;
        self.plans.get(index)
    }

    pub fn plans(&self) -> &[DayPlan] {
        &self.plans
    }

    pub fn get(&self, key: ItineraryKey) -> Option<&str> {
        self.plan(key.itinerary).map(|plan| plan.get(key.part))
    }

    /// Looks a slot up by its string key (`itinerary_2_night`).
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        ItineraryKey::all()
            .find(|key| key.to_string() == name)
            .and_then(|key| self.get(key))
    }

    /// All eight `(key, text)` pairs in (itinerary, day-part) order.
    pub fn fields(&self) -> impl Iterator<Item = (ItineraryKey, &str)> {
        ItineraryKey::all().filter_map(move |key| self.get(key).map(|text| (key, text)))
    }
}

// Serialized as the flat `itinerary_N_part -> text` map the page and the JSON
// endpoint consume.
impl Serialize for ParsedItinerary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(8))?;
        for (key, text) in self.fields() {
            map.serialize_entry(&key.to_string(), text)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(
            ItineraryKey::new(1, DayPart::Morning).to_string(),
            "itinerary_1_morning"
        );
        assert_eq!(
            ItineraryKey::new(2, DayPart::Night).to_string(),
            "itinerary_2_night"
        );
    }

    #[test]
    fn test_all_keys_are_ordered() {
        let keys: Vec<String> = ItineraryKey::all().map(|k| k.to_string()).collect();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[0], "itinerary_1_morning");
        assert_eq!(keys[3], "itinerary_1_night");
        assert_eq!(keys[4], "itinerary_2_morning");
        assert_eq!(keys[7], "itinerary_2_night");
    }

    #[test]
    fn test_anchor_spacing() {
        assert_eq!(DayPart::Afternoon.anchor(), "Afternoon: ");
        assert_eq!(DayPart::Evening.anchor(), "Evening: ");
        assert_eq!(DayPart::Night.anchor(), "Night:");
        assert_eq!(DayPart::Evening.title(), "Evening");
    }

    #[test]
    fn test_plan_index_out_of_range() {
        let parsed = ParsedItinerary::from_plans([DayPlan::default(), DayPlan::default()]);
        assert!(parsed.plan(0).is_none());
        assert!(parsed.plan(3).is_none());
        assert!(parsed.plan(2).is_some());
    }
}
