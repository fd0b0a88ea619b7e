//! Application layer for Daytrip.
//!
//! Coordinates the prompt builder, the completion client and the itinerary
//! parser behind per-browser planner sessions.

pub mod recommendation_usecase;
pub mod session;

pub use recommendation_usecase::{CredentialStatus, RecommendationOutcome, RecommendationService};
pub use session::{PlannerSession, SessionId, SessionStore};
