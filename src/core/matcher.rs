use crate::core::{graph::TransitGraph, scoring::CommuteOverlapScorer};
use crate::models::{CommuteProfile, MatchRecord, ScoringWeights};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

/// Default composite score a match must reach
pub const DEFAULT_MIN_SCORE: f64 = 0.3;

/// Default cap on returned matches
pub const DEFAULT_MAX_MATCHES: usize = 10;

/// Errors raised when registering a profile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Invalid profile: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Registry of commuters plus the ranking pipeline
///
/// # Pipeline Stages
/// 1. Look up the query user (unknown users get no matches)
/// 2. Score every other registered commuter
/// 3. Drop scores below the threshold
/// 4. Rank by score and cap the list
///
/// Paths are recomputed on every query; nothing is cached.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    scorer: CommuteOverlapScorer,
    users: IndexMap<String, CommuteProfile>,
}

impl MatchEngine {
    pub fn new(scorer: CommuteOverlapScorer) -> Self {
        Self {
            scorer,
            users: IndexMap::new(),
        }
    }

    pub fn with_weights(graph: Arc<TransitGraph>, weights: ScoringWeights) -> Self {
        Self::new(CommuteOverlapScorer::new(graph, weights))
    }

    pub fn with_default_weights(graph: Arc<TransitGraph>) -> Self {
        Self::new(CommuteOverlapScorer::with_default_weights(graph))
    }

    pub fn graph(&self) -> &TransitGraph {
        self.scorer.graph()
    }

    pub fn scorer(&self) -> &CommuteOverlapScorer {
        &self.scorer
    }

    /// Register a profile, replacing any profile with the same id
    ///
    /// # Returns
    /// The replaced profile, if there was one
    pub fn add_user(&mut self, profile: CommuteProfile) -> Result<Option<CommuteProfile>, ProfileError> {
        profile.validate()?;
        tracing::trace!("Registering user {}", profile.user_id);
        Ok(self.users.insert(profile.user_id.clone(), profile))
    }

    pub fn get_user(&self, user_id: &str) -> Option<&CommuteProfile> {
        self.users.get(user_id)
    }

    /// Registered profiles in insertion order
    pub fn users(&self) -> impl Iterator<Item = &CommuteProfile> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Find the best commute partners for a registered user
    ///
    /// # Arguments
    /// * `user_id` - The user to match
    /// * `min_score` - Minimum composite score to keep a candidate
    /// * `max_matches` - Maximum number of matches to return
    ///
    /// # Returns
    /// Matches sorted by descending score. Empty if the user is unknown.
    pub fn find_matches(&self, user_id: &str, min_score: f64, max_matches: usize) -> Vec<MatchRecord> {
        let Some(target) = self.users.get(user_id) else {
            tracing::debug!("No registered user {}, returning no matches", user_id);
            return Vec::new();
        };

        let mut matches: Vec<MatchRecord> = self
            .users
            .iter()
            .filter(|(id, _)| id.as_str() != user_id)
            .filter_map(|(_, other)| {
                let details = self.scorer.score(target, other);
                (details.overall_score >= min_score).then(|| MatchRecord {
                    user: other.clone(),
                    score: details.overall_score,
                    details,
                })
            })
            .collect();

        sort_by_score(&mut matches);
        let passing = matches.len();
        matches.truncate(max_matches);

        tracing::debug!(
            "Matched user {}: {} of {} candidates passed {:.2}, returning {}",
            user_id,
            passing,
            self.users.len() - 1,
            min_score,
            matches.len()
        );

        matches
    }

    /// Match every registered user against every other in one pass
    ///
    /// Each unordered pair is scored once and, when it passes `min_score`,
    /// recorded on both sides. Every registered user gets an entry.
    pub fn find_all_matches(&self, min_score: f64) -> IndexMap<String, Vec<MatchRecord>> {
        let mut all: IndexMap<String, Vec<MatchRecord>> = self
            .users
            .keys()
            .map(|id| (id.clone(), Vec::new()))
            .collect();

        let profiles: Vec<&CommuteProfile> = self.users.values().collect();
        for (i, user_a) in profiles.iter().enumerate() {
            for user_b in &profiles[i + 1..] {
                let details = self.scorer.score(user_a, user_b);
                if details.overall_score < min_score {
                    continue;
                }

                let score = details.overall_score;
                if let Some(list) = all.get_mut(&user_b.user_id) {
                    list.push(MatchRecord {
                        user: (*user_a).clone(),
                        score,
                        details: details.clone().swapped(),
                    });
                }
                if let Some(list) = all.get_mut(&user_a.user_id) {
                    list.push(MatchRecord {
                        user: (*user_b).clone(),
                        score,
                        details,
                    });
                }
            }
        }

        for list in all.values_mut() {
            sort_by_score(list);
        }

        let total: usize = all.values().map(Vec::len).sum();
        tracing::debug!(
            "Batch matched {} users: {} match records at {:.2}",
            all.len(),
            total,
            min_score
        );

        all
    }
}

/// Stable sort, highest score first
fn sort_by_score(matches: &mut [MatchRecord]) {
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
