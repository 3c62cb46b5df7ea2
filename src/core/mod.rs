// Core algorithm exports
pub mod graph;
pub mod matcher;
pub mod route;
pub mod scoring;

pub use graph::{TransitGraph, DEFAULT_MAX_PATH_LENGTH};
pub use matcher::{MatchEngine, ProfileError, DEFAULT_MAX_MATCHES, DEFAULT_MIN_SCORE};
pub use route::RouteOverlapScorer;
pub use scoring::{interest_overlap, time_overlap, CommuteOverlapScorer};
