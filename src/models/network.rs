use serde::{Deserialize, Serialize};

/// Raw network description handed to [`crate::core::TransitGraph::new`]
///
/// ```json
/// {
///   "stations": ["Central", "Redfern"],
///   "connections": [["Central", "Redfern"]]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkData {
    pub stations: Vec<String>,
    #[serde(default)]
    pub connections: Vec<(String, String)>,
}

impl NetworkData {
    pub fn new<S, A, B>(
        stations: impl IntoIterator<Item = S>,
        connections: impl IntoIterator<Item = (A, B)>,
    ) -> Self
    where
        S: Into<String>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            stations: stations.into_iter().map(Into::into).collect(),
            connections: connections
                .into_iter()
                .map(|(a, b)| (a.into(), b.into()))
                .collect(),
        }
    }
}
