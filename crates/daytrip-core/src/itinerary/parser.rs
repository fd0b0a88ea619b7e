//! Label-anchored decomposition of a completion into eight itinerary slots.
//!
//! The scan is forward-only: each anchor is searched for after the previous
//! one, so a label that is missing or out of order fails the whole parse.
//! Labels are only consumed at the anchor positions; the same text appearing
//! inside an activity description is left untouched.

use super::model::{DayPart, DayPlan, ITINERARY_COUNT, ItineraryKey, ParsedItinerary};
use thiserror::Error;

/// Marker separating the first itinerary block from the second.
pub const ITINERARY_SEPARATOR: &str = "Itinerary 2:";

/// Errors produced when a completion does not follow the expected layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required literal marker was not found where expected.
    #[error("Malformed completion: anchor '{anchor}' not found")]
    MalformedCompletion { anchor: &'static str },

    /// A section was located but contained only whitespace.
    #[error("Empty section: '{key}' has no content")]
    EmptySection { key: ItineraryKey },
}

impl ParseError {
    pub fn malformed(anchor: &'static str) -> Self {
        Self::MalformedCompletion { anchor }
    }

    pub fn empty(key: ItineraryKey) -> Self {
        Self::EmptySection { key }
    }

    /// The missing anchor, for `MalformedCompletion`.
    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            Self::MalformedCompletion { anchor } => Some(anchor),
            Self::EmptySection { .. } => None,
        }
    }
}

/// Splits a raw completion into two itineraries of four day parts.
///
/// All anchors of both blocks are located before any section is checked for
/// emptiness, so a structural problem is always reported as
/// [`ParseError::MalformedCompletion`] even when an earlier slot is also empty.
pub fn parse(raw: &str) -> Result<ParsedItinerary, ParseError> {
    let (first_block, second_block) = raw
        .split_once(ITINERARY_SEPARATOR)
        .ok_or(ParseError::malformed(ITINERARY_SEPARATOR))?;

    let segments = [scan_block(first_block)?, scan_block(second_block)?];

    let mut plans: [DayPlan; ITINERARY_COUNT as usize] = Default::default();
    for (index, (plan, block_segments)) in plans.iter_mut().zip(segments).enumerate() {
        let itinerary = index as u8 + 1;
        for (part, segment) in DayPart::ALL.into_iter().zip(block_segments) {
            let text = segment.trim();
            if text.is_empty() {
                return Err(ParseError::empty(ItineraryKey::new(itinerary, part)));
            }
            *plan.slot_mut(part) = text.to_string();
        }
    }

    tracing::debug!(input_len = raw.len(), "Parsed completion into itinerary");
    Ok(ParsedItinerary::from_plans(plans))
}

/// Locates the four untrimmed section bodies of one itinerary block.
fn scan_block(block: &str) -> Result<[&str; 4], ParseError> {
    let mut bodies = [""; 4];
    let mut remainder = block;

    for (slot, next) in [DayPart::Afternoon, DayPart::Evening, DayPart::Night]
        .into_iter()
        .enumerate()
    {
        let (segment, rest) = remainder
            .split_once(next.anchor())
            .ok_or(ParseError::malformed(next.anchor()))?;
        bodies[slot] = segment;
        remainder = rest;
    }
    bodies[3] = remainder;

    bodies[0] = strip_morning_header(bodies[0])?;
    Ok(bodies)
}

/// Drops everything up to and including the first `Morning:` label.
///
/// Whatever precedes the label (the `Itinerary N:` header, or a preamble the
/// model added) is not part of any section. Later occurrences of the label
/// belong to the morning text and are kept; only the first one is consumed.
fn strip_morning_header(segment: &str) -> Result<&str, ParseError> {
    let label = DayPart::Morning.anchor();
    segment
        .split_once(label)
        .map(|(_, body)| body)
        .ok_or(ParseError::malformed(label))
}
