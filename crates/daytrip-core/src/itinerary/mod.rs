//! Itinerary domain: slot types and the completion parser.

pub mod model;
pub mod parser;

pub use model::{DayPart, DayPlan, ITINERARY_COUNT, ItineraryKey, ParsedItinerary};
pub use parser::{ITINERARY_SEPARATOR, ParseError, parse};
