use crate::core::{graph::TransitGraph, route::RouteOverlapScorer};
use crate::models::{CommuteProfile, CommuteWindow, OverlapResult, ScoringWeights};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Station count at which home/work proximity reaches zero
pub const PROXIMITY_HORIZON: usize = 20;

/// Compares two commuters over a shared transit graph
///
/// Scoring formula:
/// score = (
///     route_overlap * 0.35 +       # home -> work paths
///     reverse_overlap * 0.25 +     # work -> home paths
///     time_overlap * 0.25 +        # commute windows
///     proximity * 0.15 +           # home/home and work/work distance
///     interest_overlap * 0.20      # shared interests
/// )
#[derive(Debug, Clone)]
pub struct CommuteOverlapScorer {
    graph: Arc<TransitGraph>,
    route: RouteOverlapScorer,
    weights: ScoringWeights,
}

impl CommuteOverlapScorer {
    pub fn new(graph: Arc<TransitGraph>, weights: ScoringWeights) -> Self {
        Self {
            graph,
            route: RouteOverlapScorer::new(),
            weights,
        }
    }

    pub fn with_default_weights(graph: Arc<TransitGraph>) -> Self {
        Self::new(graph, ScoringWeights::default())
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `user_b` against `user_a`
    pub fn score(&self, user_a: &CommuteProfile, user_b: &CommuteProfile) -> OverlapResult {
        let path_a = self
            .graph
            .find_shortest_path(&user_a.home_station, &user_a.work_station);
        let path_b = self
            .graph
            .find_shortest_path(&user_b.home_station, &user_b.work_station);

        let route_overlap = self.route.score(&path_a, &path_b);

        // Computed on its own, never derived from route_overlap
        let reversed_a: Vec<&str> = path_a.iter().rev().map(String::as_str).collect();
        let reversed_b: Vec<&str> = path_b.iter().rev().map(String::as_str).collect();
        let reverse_overlap = self.route.score(&reversed_a, &reversed_b);

        let time = time_overlap(&user_a.commute_times, &user_b.commute_times);
        let proximity = self.station_proximity(user_a, user_b);
        let interest = interest_overlap(&user_a.interests, &user_b.interests);

        let w = &self.weights;
        let overall_score = route_overlap * w.route
            + reverse_overlap * w.reverse_route
            + time * w.time
            + proximity * w.proximity
            + interest * w.interest;

        OverlapResult {
            overall_score,
            route_overlap,
            reverse_overlap,
            time_overlap: time,
            proximity,
            interest_overlap: interest,
            user1_path: path_a,
            user2_path: path_b,
        }
    }

    /// Average of home/home and work/work proximity (0-1)
    ///
    /// Distances are station counts of the shortest path. An unreachable
    /// pair has distance 0 and scores as fully proximate.
    pub fn station_proximity(&self, user_a: &CommuteProfile, user_b: &CommuteProfile) -> f64 {
        let home_distance = self
            .graph
            .find_shortest_path(&user_a.home_station, &user_b.home_station)
            .len();
        let work_distance = self
            .graph
            .find_shortest_path(&user_a.work_station, &user_b.work_station)
            .len();

        (proximity_from_distance(home_distance) + proximity_from_distance(work_distance)) / 2.0
    }
}

/// Map a station-count distance to a proximity score (0-1)
#[inline]
pub fn proximity_from_distance(distance: usize) -> f64 {
    if distance == 0 {
        return 1.0;
    }
    let horizon = PROXIMITY_HORIZON as f64;
    ((horizon - distance as f64) / horizon).max(0.0)
}

/// Mean overlap ratio over every cross pair of commute windows
///
/// Each pair contributes `overlap / longer_window`, disjoint pairs
/// contribute 0. Returns 0.0 when either list is empty.
pub fn time_overlap(windows_a: &[CommuteWindow], windows_b: &[CommuteWindow]) -> f64 {
    let pairs = windows_a.len() * windows_b.len();
    if pairs == 0 {
        return 0.0;
    }

    let total: f64 = windows_a
        .iter()
        .flat_map(|a| windows_b.iter().map(move |b| (a, b)))
        .map(|(a, b)| {
            let overlap = a.overlap_minutes(b);
            if overlap == 0 {
                return 0.0;
            }
            overlap as f64 / a.duration_minutes().max(b.duration_minutes()) as f64
        })
        .sum();

    total / pairs as f64
}

/// Jaccard similarity of two interest sets, 0.0 if either is empty
pub fn interest_overlap(interests_a: &BTreeSet<String>, interests_b: &BTreeSet<String>) -> f64 {
    if interests_a.is_empty() || interests_b.is_empty() {
        return 0.0;
    }
    let shared = interests_a.intersection(interests_b).count();
    let union = interests_a.union(interests_b).count();
    shared as f64 / union as f64
}
