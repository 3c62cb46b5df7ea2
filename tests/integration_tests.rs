// Integration tests for Commute Match

use commute_match::core::{MatchEngine, TransitGraph, DEFAULT_MAX_MATCHES, DEFAULT_MIN_SCORE};
use commute_match::models::{CommuteProfile, CommuteWindow, NetworkData};
use commute_match::services::{load_network, ProfileGenerator};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;

fn sydney_graph() -> Arc<TransitGraph> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sydney_network.json");
    Arc::new(TransitGraph::new(&load_network(path).unwrap()))
}

fn create_test_profile(
    id: &str,
    home: &str,
    work: &str,
    windows: &[(u32, u32, u32, u32)],
    interests: &[&str],
) -> CommuteProfile {
    CommuteProfile {
        user_id: id.to_string(),
        name: format!("User {}", id),
        home_station: home.to_string(),
        work_station: work.to_string(),
        commute_times: windows
            .iter()
            .map(|&(sh, sm, eh, em)| CommuteWindow::from_hm(sh, sm, eh, em).unwrap())
            .collect(),
        age: 30,
        interests: interests.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_integration_end_to_end_matching() {
    let mut engine = MatchEngine::with_default_weights(sydney_graph());

    let candidates = vec![
        create_test_profile("1", "Parramatta", "Town Hall", &[(8, 0, 8, 30), (17, 0, 17, 30)], &["Coffee", "Books"]),
        create_test_profile("2", "Parramatta", "Town Hall", &[(8, 0, 8, 30), (17, 0, 17, 30)], &["Coffee", "Books"]),
        create_test_profile("3", "Strathfield", "Central", &[(8, 15, 8, 45), (17, 15, 17, 45)], &["Coffee"]),
        create_test_profile("4", "Chatswood", "Wynyard", &[(7, 0, 7, 30), (16, 0, 16, 30)], &["Music"]),
        create_test_profile("5", "Cronulla", "Bondi Junction", &[(9, 30, 10, 0), (18, 30, 19, 0)], &["Golf"]),
    ];
    for profile in candidates {
        engine.add_user(profile).unwrap();
    }

    let matches = engine.find_matches("1", DEFAULT_MIN_SCORE, DEFAULT_MAX_MATCHES);

    assert!(!matches.is_empty());
    assert_eq!(matches[0].user_id(), "2");
    assert!(matches.iter().all(|m| m.user_id() != "1"));
    for pair in matches.windows(2) {
        assert!(pair[0].score >= pair[1].score, "Matches not sorted by score");
    }
    for m in &matches {
        assert!(m.score >= DEFAULT_MIN_SCORE);
        assert_eq!(m.score, m.details.overall_score);
        assert_eq!(
            m.details.user1_path,
            vec!["Parramatta", "Granville", "Lidcombe", "Strathfield", "Burwood", "Ashfield", "Redfern", "Central", "Town Hall"]
        );
    }
}

#[test]
fn test_unrelated_commuters_excluded() {
    let mut engine = MatchEngine::with_default_weights(sydney_graph());
    engine
        .add_user(create_test_profile("north", "Hornsby", "Milsons Point", &[(7, 0, 7, 30)], &["Books"]))
        .unwrap();
    engine
        .add_user(create_test_profile("south", "Cronulla", "Hurstville", &[(19, 0, 19, 30)], &["Golf"]))
        .unwrap();

    assert!(engine.find_matches("north", 0.2, 10).is_empty());
    assert!(engine.find_matches("south", 0.2, 10).is_empty());
}

#[test]
fn test_unregistered_user_gets_nothing() {
    let engine = MatchEngine::with_default_weights(sydney_graph());
    assert!(engine.find_matches("ghost", 0.0, 10).is_empty());
}

#[test]
fn test_generated_registry_batch_matches() {
    let graph = sydney_graph();
    let profiles = ProfileGenerator::new(&graph)
        .generate(12, &mut StdRng::seed_from_u64(2024))
        .unwrap();

    let mut engine = MatchEngine::with_default_weights(graph);
    for profile in profiles {
        engine.add_user(profile).unwrap();
    }

    let all = engine.find_all_matches(0.2);
    assert_eq!(all.len(), 12);
    for (user_id, list) in &all {
        assert!(list.iter().all(|m| m.user_id() != user_id));
        assert!(list.iter().all(|m| m.score >= 0.2));
        for pair in list.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        let capped = engine.find_matches(user_id, 0.2, 3);
        assert!(capped.len() <= 3);
        assert_eq!(capped.len(), list.len().min(3));
    }
}

fn station_name(i: usize) -> String {
    format!("S{}", i)
}

/// Random connected-or-not graphs over up to 12 stations
fn arb_network() -> impl Strategy<Value = NetworkData> {
    (2usize..12).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..(n * 2));
        (Just(n), edges).prop_map(|(n, edges)| {
            let connections: Vec<(String, String)> = edges
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (station_name(a), station_name(b)))
                .collect();
            NetworkData::new((0..n).map(station_name), connections)
        })
    })
}

/// Hop distance by plain level-order traversal
fn reference_distance(graph: &TransitGraph, from: &str, to: &str) -> Option<usize> {
    let mut frontier = vec![from.to_string()];
    let mut seen = std::collections::HashSet::from([from.to_string()]);
    let mut depth = 0;
    while !frontier.is_empty() {
        if frontier.iter().any(|s| s == to) {
            return Some(depth);
        }
        let mut next = Vec::new();
        for station in &frontier {
            for neighbor in graph.neighbors(station) {
                if seen.insert(neighbor.clone()) {
                    next.push(neighbor.clone());
                }
            }
        }
        frontier = next;
        depth += 1;
    }
    None
}

proptest! {
    #[test]
    fn prop_shortest_path_length_matches_distance(data in arb_network(), a in 0usize..12, b in 0usize..12) {
        let graph = TransitGraph::new(&data);
        let (from, to) = (station_name(a), station_name(b));
        let forward = graph.find_shortest_path(&from, &to);
        let backward = graph.find_shortest_path(&to, &from);

        prop_assert_eq!(forward.len(), backward.len());
        match (graph.contains(&from) && graph.contains(&to)).then(|| reference_distance(&graph, &from, &to)).flatten() {
            Some(distance) => {
                prop_assert_eq!(forward.len(), distance + 1);
                prop_assert_eq!(forward.first(), Some(&from));
                prop_assert_eq!(forward.last(), Some(&to));
                for hop in forward.windows(2) {
                    prop_assert!(graph.neighbors(&hop[0]).contains(&hop[1]));
                }
            }
            None => prop_assert!(forward.is_empty()),
        }
    }

    #[test]
    fn prop_find_matches_contract(
        seed in any::<u64>(),
        count in 0usize..10,
        min_score in 0.0f64..1.2,
        max_matches in 0usize..6,
    ) {
        let graph = sydney_graph();
        let profiles = ProfileGenerator::new(&graph)
            .generate(count, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let mut engine = MatchEngine::with_default_weights(graph);
        for profile in profiles {
            engine.add_user(profile).unwrap();
        }

        let user_ids: Vec<String> = engine.users().map(|p| p.user_id.clone()).collect();
        for user_id in &user_ids {
            let matches = engine.find_matches(user_id, min_score, max_matches);
            prop_assert!(matches.len() <= max_matches);
            prop_assert!(matches.iter().all(|m| m.score >= min_score));
            prop_assert!(matches.iter().all(|m| m.user_id() != user_id));
            for pair in matches.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }
    }
}
