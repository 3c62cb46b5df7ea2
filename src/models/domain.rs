use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use validator::Validate;

/// Errors raised when building a commute window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window start {start} is not before end {end}")]
    NotIncreasing { start: NaiveTime, end: NaiveTime },

    #[error("invalid time of day {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
}

/// One daily travel period, e.g. the morning commute.
///
/// The start is always strictly before the end; this holds for windows
/// built with [`CommuteWindow::new`] and for deserialized ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds", into = "WindowBounds")]
pub struct CommuteWindow {
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Clone, Serialize, Deserialize)]
struct WindowBounds {
    start: NaiveTime,
    end: NaiveTime,
}

impl CommuteWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::NotIncreasing { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a window from hour/minute pairs
    pub fn from_hm(
        start_hour: u32,
        start_minute: u32,
        end_hour: u32,
        end_minute: u32,
    ) -> Result<Self, WindowError> {
        let start = hm(start_hour, start_minute)?;
        let end = hm(end_hour, end_minute)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Start as minutes since midnight (seconds are dropped)
    #[inline]
    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start)
    }

    /// End as minutes since midnight (seconds are dropped)
    #[inline]
    pub fn end_minute(&self) -> u32 {
        minute_of_day(self.end)
    }

    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute().saturating_sub(self.start_minute())
    }

    /// Length of the shared interval in whole minutes, 0 when disjoint
    #[inline]
    pub fn overlap_minutes(&self, other: &CommuteWindow) -> u32 {
        let start = self.start_minute().max(other.start_minute());
        let end = self.end_minute().min(other.end_minute());
        end.saturating_sub(start)
    }
}

impl TryFrom<WindowBounds> for CommuteWindow {
    type Error = WindowError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl From<CommuteWindow> for WindowBounds {
    fn from(window: CommuteWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
        }
    }
}

fn hm(hour: u32, minute: u32) -> Result<NaiveTime, WindowError> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(WindowError::InvalidTime { hour, minute })
}

#[inline]
fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// A commuter registered for matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CommuteProfile {
    #[validate(length(min = 1))]
    #[serde(alias = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(alias = "homeStation")]
    pub home_station: String,
    #[serde(alias = "workStation")]
    pub work_station: String,
    #[serde(alias = "commuteTimes", default)]
    pub commute_times: Vec<CommuteWindow>,
    pub age: u8,
    #[serde(default)]
    pub interests: BTreeSet<String>,
}

/// Score breakdown for one pair of commuters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapResult {
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
    #[serde(rename = "routeOverlap")]
    pub route_overlap: f64,
    #[serde(rename = "reverseOverlap")]
    pub reverse_overlap: f64,
    #[serde(rename = "timeOverlap")]
    pub time_overlap: f64,
    pub proximity: f64,
    #[serde(rename = "interestOverlap")]
    pub interest_overlap: f64,
    #[serde(rename = "user1Path")]
    pub user1_path: Vec<String>,
    #[serde(rename = "user2Path")]
    pub user2_path: Vec<String>,
}

impl OverlapResult {
    /// Same breakdown seen from the other commuter's side
    pub fn swapped(mut self) -> Self {
        std::mem::swap(&mut self.user1_path, &mut self.user2_path);
        self
    }
}

/// Ranked match result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub user: CommuteProfile,
    pub score: f64,
    pub details: OverlapResult,
}

impl MatchRecord {
    pub fn user_id(&self) -> &str {
        &self.user.user_id
    }
}

/// Composite scoring weights
///
/// The defaults sum to 1.2; scores are not renormalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub route: f64,
    pub reverse_route: f64,
    pub time: f64,
    pub proximity: f64,
    pub interest: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            route: 0.35,
            reverse_route: 0.25,
            time: 0.25,
            proximity: 0.15,
            interest: 0.20,
        }
    }
}
