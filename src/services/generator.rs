use crate::core::TransitGraph;
use crate::models::{CommuteProfile, CommuteWindow, WindowError};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::ops::RangeInclusive;

pub const POPULAR_HOMES: &[&str] = &["Bondi Junction", "Chatswood", "Parramatta", "Liverpool", "Cronulla"];
pub const POPULAR_WORKPLACES: &[&str] = &["Central", "Town Hall", "Wynyard", "Martin Place", "Circular Quay"];

const NAMES: &[&str] = &["Alex", "Sam", "Jordan", "Casey", "Taylor", "Morgan"];
const INTERESTS: &[&str] = &["Coffee", "Books", "Fitness", "Music", "Travel", "Food"];

const MORNING_HOURS: RangeInclusive<u32> = 7..=9;
const EVENING_HOURS: RangeInclusive<u32> = 16..=18;
const QUARTER_HOURS: &[u32] = &[0, 15, 30, 45];
const WINDOW_MINUTES: RangeInclusive<u32> = 15..=45;
const AGES: RangeInclusive<u8> = 22..=45;
const INTEREST_COUNT: RangeInclusive<usize> = 2..=4;

/// Synthetic commuter fixtures
///
/// All randomness comes from the caller's `Rng`, so a seeded generator
/// always produces the same profiles for the same graph.
#[derive(Debug, Clone)]
pub struct ProfileGenerator {
    stations: Vec<String>,
    homes: Vec<String>,
    workplaces: Vec<String>,
}

impl ProfileGenerator {
    /// Generator using the default Sydney home and workplace pools
    pub fn new(graph: &TransitGraph) -> Self {
        Self::with_pools(graph, POPULAR_HOMES, POPULAR_WORKPLACES)
    }

    /// Pools are filtered to stations in `graph`; an empty pool falls back
    /// to every station.
    pub fn with_pools(graph: &TransitGraph, homes: &[&str], workplaces: &[&str]) -> Self {
        let mut stations: Vec<String> = graph.stations().map(str::to_string).collect();
        stations.sort();

        let pick = |pool: &[&str]| -> Vec<String> {
            let known: Vec<String> = pool
                .iter()
                .filter(|s| graph.contains(s))
                .map(|s| s.to_string())
                .collect();
            if known.is_empty() {
                stations.clone()
            } else {
                known
            }
        };
        let homes = pick(homes);
        let workplaces = pick(workplaces);

        Self {
            stations,
            homes,
            workplaces,
        }
    }

    /// Generate `count` profiles with ids `user1..=userN`
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<CommuteProfile>, WindowError> {
        if self.stations.is_empty() {
            tracing::warn!("Cannot generate profiles for an empty network");
            return Ok(Vec::new());
        }

        (1..=count).map(|i| self.generate_one(i, rng)).collect()
    }

    fn generate_one<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Result<CommuteProfile, WindowError> {
        let home = choose(&self.homes, rng);
        let mut work = choose(&self.workplaces, rng);
        while home == work && self.stations.len() > 1 {
            work = choose(&self.stations, rng);
        }

        let morning = random_window(MORNING_HOURS, rng)?;
        let evening = random_window(EVENING_HOURS, rng)?;

        let name = NAMES.choose(rng).copied().unwrap_or("Commuter");
        let interest_count = rng.random_range(INTEREST_COUNT);
        let interests = INTERESTS
            .choose_multiple(rng, interest_count)
            .map(|s| s.to_string())
            .collect();

        Ok(CommuteProfile {
            user_id: format!("user{}", index),
            name: format!("{}_{}", name, index),
            home_station: home.to_string(),
            work_station: work.to_string(),
            commute_times: vec![morning, evening],
            age: rng.random_range(AGES),
            interests,
        })
    }
}

fn choose<'a, R: Rng + ?Sized>(pool: &'a [String], rng: &mut R) -> &'a str {
    pool.choose(rng).map(String::as_str).unwrap_or_default()
}

/// Quarter-hour start within `hours`, lasting 15-45 minutes
fn random_window<R: Rng + ?Sized>(hours: RangeInclusive<u32>, rng: &mut R) -> Result<CommuteWindow, WindowError> {
    let hour = rng.random_range(hours);
    let minute = QUARTER_HOURS.choose(rng).copied().unwrap_or(0);
    let end = hour * 60 + minute + rng.random_range(WINDOW_MINUTES);
    CommuteWindow::from_hm(hour, minute, end / 60, end % 60)
}
