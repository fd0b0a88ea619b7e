//! Planner sessions.
//!
//! One [`PlannerSession`] exists per browser session cookie. Sessions live in
//! memory only and are dropped with the process.

mod planner;
mod store;

pub use planner::{PlannerSession, SessionId};
pub use store::SessionStore;
