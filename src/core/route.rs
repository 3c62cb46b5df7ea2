use std::collections::HashSet;

/// Weight of the station-set Jaccard term
pub const JACCARD_WEIGHT: f64 = 0.7;

/// Weight of the shared-transition term
pub const SEQUENCE_WEIGHT: f64 = 0.3;

/// Similarity between two station sequences
///
/// Scoring formula:
/// score = (
///     jaccard(stations_a, stations_b) * 0.7 +
///     shared_transitions / avg_path_len * 0.3
/// )
///
/// Two identical paths of length L score `0.7 + 0.3 * (L - 1) / L`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOverlapScorer;

impl RouteOverlapScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score two paths, 0.0 when either is empty
    pub fn score<S: AsRef<str>>(&self, path_a: &[S], path_b: &[S]) -> f64 {
        if path_a.is_empty() || path_b.is_empty() {
            return 0.0;
        }

        let jaccard = station_jaccard(path_a, path_b);

        // Normalized by average path length, not edge count
        let avg_len = (path_a.len() + path_b.len()) as f64 / 2.0;
        let sequential = shared_transitions(path_a, path_b) as f64 / avg_len;

        JACCARD_WEIGHT * jaccard + SEQUENCE_WEIGHT * sequential
    }
}

/// Jaccard similarity of the station sets of two paths
pub fn station_jaccard<S: AsRef<str>>(path_a: &[S], path_b: &[S]) -> f64 {
    let set_a: HashSet<&str> = path_a.iter().map(AsRef::as_ref).collect();
    let set_b: HashSet<&str> = path_b.iter().map(AsRef::as_ref).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Count index pairs `(i, j)` where both paths make the same directed hop
pub fn shared_transitions<S: AsRef<str>>(path_a: &[S], path_b: &[S]) -> usize {
    path_a
        .windows(2)
        .map(|hop_a| {
            path_b
                .windows(2)
                .filter(|hop_b| {
                    hop_a[0].as_ref() == hop_b[0].as_ref() && hop_a[1].as_ref() == hop_b[1].as_ref()
                })
                .count()
        })
        .sum()
}
