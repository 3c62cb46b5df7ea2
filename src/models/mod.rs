// Model exports
pub mod domain;
pub mod network;

pub use domain::{CommuteProfile, CommuteWindow, MatchRecord, OverlapResult, ScoringWeights, WindowError};
pub use network::NetworkData;
