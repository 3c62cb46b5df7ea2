use crate::models::{CommuteProfile, MatchRecord};

const ARROW: &str = " → ";

/// Join a station path for display
pub fn format_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(ARROW)
}

/// One line describing a commuter and the path they ride
pub fn format_commute(profile: &CommuteProfile, path: &[String]) -> String {
    let interests: Vec<&str> = profile.interests.iter().map(String::as_str).collect();
    format!(
        "{}: {}{}{} | Path: {} | Interests: {}",
        profile.name,
        profile.home_station,
        ARROW,
        profile.work_station,
        format_path(path),
        interests.join(", ")
    )
}

/// One line per ranked match, numbered from 1
pub fn format_matches(matches: &[MatchRecord]) -> Vec<String> {
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "{}. {} | Score: {:.2} | Route overlap: {:.2} | Interests: {:.2}",
                i + 1,
                m.user.name,
                m.score,
                m.details.route_overlap,
                m.details.interest_overlap
            )
        })
        .collect()
}
