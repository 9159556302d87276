pub mod activity;
pub mod leaderboard;
mod lenient;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::Activity;
pub use leaderboard::LeaderboardEntry;
pub use team::Team;
pub use user::{User, UserUpdate};
pub use workout::Workout;

/// Stable key for a record: its `_id` when present, otherwise its position
pub fn record_key(id: Option<&str>, index: usize) -> String {
    match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => index.to_string(),
    }
}

/// Treat null, missing and blank strings alike
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
