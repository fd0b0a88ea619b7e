//! Domain layer for Daytrip.
//!
//! Holds the itinerary parser, the value types that flow between layers and
//! the traits the outer crates implement.

pub mod completion;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod preference;
pub mod secret;
pub mod transcript;

// Re-export common error type
pub use error::DaytripError;
