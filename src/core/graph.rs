use crate::models::NetworkData;
use std::collections::{HashMap, HashSet, VecDeque};

/// Default station-count cap for [`TransitGraph::find_all_paths`]
pub const DEFAULT_MAX_PATH_LENGTH: usize = 20;

/// Undirected transit network
///
/// Built once from a [`NetworkData`] and immutable afterwards. Neighbor
/// lists keep the order in which connections were declared, which fixes
/// the tie-break between equally short paths.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    stations: HashSet<String>,
    adjacency: HashMap<String, Vec<String>>,
    connection_count: usize,
}

impl TransitGraph {
    pub fn new(data: &NetworkData) -> Self {
        let stations: HashSet<String> = data.stations.iter().cloned().collect();

        let mut adjacency: HashMap<String, Vec<String>> = stations
            .iter()
            .map(|s| (s.clone(), Vec::new()))
            .collect();

        for (a, b) in &data.connections {
            adjacency.entry(a.clone()).or_default().push(b.clone());
            adjacency.entry(b.clone()).or_default().push(a.clone());
        }

        tracing::debug!(
            "Built transit graph: {} stations, {} connections",
            stations.len(),
            data.connections.len()
        );

        Self {
            stations,
            adjacency,
            connection_count: data.connections.len(),
        }
    }

    #[inline]
    pub fn contains(&self, station: &str) -> bool {
        self.stations.contains(station)
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    /// Iterate over the known stations (unordered)
    pub fn stations(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(String::as_str)
    }

    /// Neighbors in declaration order; empty for unknown stations
    pub fn neighbors(&self, station: &str) -> &[String] {
        self.adjacency
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find a shortest path between two stations using breadth-first search
    ///
    /// # Returns
    /// The stations along the path, both endpoints included. `[start]` when
    /// `start == end`, and an empty vector when either station is unknown
    /// or no path exists.
    pub fn find_shortest_path(&self, start: &str, end: &str) -> Vec<String> {
        if !self.contains(start) || !self.contains(end) {
            return Vec::new();
        }
        if start == end {
            return vec![start.to_string()];
        }

        let mut parent: HashMap<&str, &str> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut queue: VecDeque<&str> = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                if neighbor == end {
                    let mut path = trace_back(&parent, current);
                    path.push(end.to_string());
                    tracing::trace!("Path {} -> {}: {} stations", start, end, path.len());
                    return path;
                }
                if visited.insert(neighbor.as_str()) {
                    parent.insert(neighbor.as_str(), current);
                    queue.push_back(neighbor.as_str());
                }
            }
        }

        tracing::trace!("No path {} -> {}", start, end);
        Vec::new()
    }

    /// Enumerate every simple path between two stations
    ///
    /// Depth-first in neighbor order. Paths longer than `max_length`
    /// stations are pruned.
    pub fn find_all_paths(&self, start: &str, end: &str, max_length: usize) -> Vec<Vec<String>> {
        if !self.contains(start) || !self.contains(end) {
            return Vec::new();
        }
        if start == end {
            return vec![vec![start.to_string()]];
        }

        let mut paths = Vec::new();
        let mut path = vec![start];
        let mut on_path: HashSet<&str> = HashSet::from([start]);
        self.walk_paths(end, max_length, &mut path, &mut on_path, &mut paths);
        paths
    }

    fn walk_paths<'a>(
        &'a self,
        end: &str,
        max_length: usize,
        path: &mut Vec<&'a str>,
        on_path: &mut HashSet<&'a str>,
        paths: &mut Vec<Vec<String>>,
    ) {
        if path.len() > max_length {
            return;
        }
        let Some(&current) = path.last() else {
            return;
        };
        if current == end {
            paths.push(path.iter().map(|s| s.to_string()).collect());
            return;
        }

        for next in self.neighbors(current) {
            if on_path.insert(next.as_str()) {
                path.push(next.as_str());
                self.walk_paths(end, max_length, path, on_path, paths);
                path.pop();
                on_path.remove(next.as_str());
            }
        }
    }
}

/// Rebuild the path from the search root to `node` via the parent links
fn trace_back(parent: &HashMap<&str, &str>, node: &str) -> Vec<String> {
    let mut path = vec![node.to_string()];
    let mut cursor = node;
    while let Some(&prev) = parent.get(cursor) {
        path.push(prev.to_string());
        cursor = prev;
    }
    path.reverse();
    path
}
