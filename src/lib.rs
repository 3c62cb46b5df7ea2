//! Commute Match - pairs transit commuters whose routes, schedules and interests overlap
//!
//! The core builds a transit graph, scores pairs of commuters against it and
//! ranks the best commute partners for a given user. Everything runs in
//! memory over data supplied by the caller.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use self::core::{CommuteOverlapScorer, MatchEngine, RouteOverlapScorer, TransitGraph};
pub use models::{CommuteProfile, CommuteWindow, MatchRecord, NetworkData, OverlapResult, ScoringWeights};
