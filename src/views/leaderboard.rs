// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Leaderboard view
//!
//! Rank is the 1-based position in the server's response. Entries are
//! never re-sorted and ties are never broken locally.

use tracing::error;

use crate::api::{ApiError, LeaderboardApi};
use crate::constants::messages::{NO_TEAM, UNKNOWN_USER};
use crate::logging::AppLogger;
use crate::models::LeaderboardEntry;
use crate::screen::ListState;

const SCREEN: &str = "leaderboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Podium {
    Gold,
    Silver,
    Bronze,
}

impl Podium {
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }
}

/// One display row; absent metrics read as zero
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub rank: usize,
    /// Stable row key: `user_id`, then `_id`, then the rank
    pub key: String,
    pub username: String,
    pub email: String,
    pub team_name: String,
    pub total_activities: u64,
    pub total_calories: u64,
    /// Two decimals
    pub total_distance: String,
    pub total_duration: u64,
    pub podium: Option<Podium>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn rank_entry(rank: usize, entry: &LeaderboardEntry) -> RankedRow {
    let key = non_blank(entry.user_id.as_deref())
        .or_else(|| non_blank(entry.id.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| rank.to_string());

    RankedRow {
        rank,
        key,
        username: non_blank(entry.username.as_deref())
            .unwrap_or(UNKNOWN_USER)
            .to_string(),
        email: entry.email.clone().unwrap_or_default(),
        team_name: non_blank(entry.team_name.as_deref())
            .unwrap_or(NO_TEAM)
            .to_string(),
        total_activities: entry.total_activities.unwrap_or(0),
        total_calories: entry.total_calories.unwrap_or(0),
        total_distance: format!("{:.2}", entry.total_distance.unwrap_or(0.0)),
        total_duration: entry.total_duration.unwrap_or(0),
        podium: Podium::for_rank(rank),
    }
}

/// Positional ranking of entries in response order
pub fn rank_entries(entries: &[LeaderboardEntry]) -> Vec<RankedRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| rank_entry(index + 1, entry))
        .collect()
}

/// Read-only screen over the leaderboard endpoint
pub struct LeaderboardScreen<L> {
    api: L,
    entries: Vec<LeaderboardEntry>,
    state: ListState,
    error: Option<String>,
}

impl<L: LeaderboardApi> LeaderboardScreen<L> {
    pub fn new(api: L) -> Self {
        Self {
            api,
            entries: Vec::new(),
            state: ListState::Loading,
            error: None,
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn rows(&self) -> Vec<RankedRow> {
        rank_entries(&self.entries)
    }

    pub async fn load(&mut self) {
        self.state = ListState::Loading;
        match self.api.leaderboard().await {
            Ok(entries) => {
                AppLogger::log_screen_event(SCREEN, "load", true, None);
                self.entries = entries;
                self.state = ListState::Ready;
                self.error = None;
            }
            Err(e) => {
                self.state = ListState::Failed;
                self.surface(&e);
            }
        }
    }

    fn surface(&mut self, err: &ApiError) {
        error!(screen = SCREEN, status = ?err.status(), "Error: {}", err);
        AppLogger::log_screen_event(SCREEN, "load", false, Some(&err.to_string()));
        self.error = Some(
            err.server_message()
                .unwrap_or_else(|| "Failed to load leaderboard. Please try again later.".to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResult;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedBoard(Option<Vec<LeaderboardEntry>>);

    #[async_trait]
    impl LeaderboardApi for FixedBoard {
        async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>> {
            match &self.0 {
                Some(entries) => Ok(entries.clone()),
                None => Err(ApiError::Status {
                    status: 502,
                    body: Some(json!("<html>Bad Gateway</html>")),
                }),
            }
        }
    }

    fn entry(value: serde_json::Value) -> LeaderboardEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_rank_is_positional() {
        let entries = vec![
            entry(json!({"user_id": "a", "username": "A", "total_calories": 10})),
            entry(json!({"user_id": "b", "username": "B", "total_calories": 900})),
            entry(json!({"user_id": "c", "username": "C", "total_calories": 50})),
        ];

        let rows = rank_entries(&entries);

        let ranks: Vec<(usize, &str)> = rows.iter().map(|r| (r.rank, r.username.as_str())).collect();
        assert_eq!(ranks, vec![(1, "A"), (2, "B"), (3, "C")]);
        assert_eq!(rows[0].podium, Some(Podium::Gold));
        assert_eq!(rows[2].podium, Some(Podium::Bronze));
    }

    #[test]
    fn test_partial_entry_renders_zeroes() {
        let rows = rank_entries(&[LeaderboardEntry::default()]);
        let row = &rows[0];

        assert_eq!(row.total_activities, 0);
        assert_eq!(row.total_calories, 0);
        assert_eq!(row.total_duration, 0);
        assert_eq!(row.total_distance, "0.00");
        assert_eq!(row.username, UNKNOWN_USER);
        assert_eq!(row.team_name, NO_TEAM);
        assert_eq!(row.key, "1");
    }

    #[test]
    fn test_row_key_and_distance_format() {
        let rows = rank_entries(&[
            entry(json!({"_id": "e1", "total_distance": 12.346})),
            entry(json!({"user_id": "u2", "_id": "e2", "user_name": "thor"})),
            entry(json!({})),
            entry(json!({})),
        ]);

        assert_eq!(rows[0].key, "e1");
        assert_eq!(rows[0].total_distance, "12.35");
        assert_eq!(rows[1].key, "u2");
        assert_eq!(rows[1].username, "thor");
        assert_eq!(rows[3].key, "4");
        assert_eq!(rows[3].podium, None);
    }

    #[test]
    fn test_numeric_middle_entry_keeps_following_ranks() {
        let entries: Vec<LeaderboardEntry> = crate::api::collect_positional(json!([
            {"user_id": "a", "username": "A"},
            {"user_id": 2, "username": "B"},
            {"user_id": "c", "username": "C"}
        ]));

        let rows = rank_entries(&entries);

        let ranks: Vec<(usize, &str, &str)> = rows
            .iter()
            .map(|r| (r.rank, r.key.as_str(), r.username.as_str()))
            .collect();
        assert_eq!(ranks, vec![(1, "a", "A"), (2, "2", "B"), (3, "c", "C")]);
        assert_eq!(rows[2].podium, Some(Podium::Bronze));
    }

    #[tokio::test]
    async fn test_screen_load_and_failure() {
        let mut screen = LeaderboardScreen::new(FixedBoard(Some(vec![LeaderboardEntry::default()])));
        screen.load().await;
        assert_eq!(screen.state(), ListState::Ready);
        assert_eq!(screen.rows().len(), 1);

        let mut screen = LeaderboardScreen::new(FixedBoard(None));
        screen.load().await;
        assert_eq!(screen.state(), ListState::Failed);
        assert_eq!(
            screen.error(),
            Some("Failed to load leaderboard. Please try again later.")
        );
        assert!(screen.entries().is_empty());
    }
}
