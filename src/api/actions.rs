// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Server-side actions beyond plain CRUD
//!
//! List-shaped responses go through the same normalizer as the CRUD lists.

use reqwest::Method;
use serde_json::{json, Value};

use super::client::{ApiClient, HttpResource};
use super::error::ApiResult;
use super::normalize::{collect_positional, collect_records};
use super::resource::{Activities, ResourceKind, Teams, Users, Workouts};
use crate::constants::endpoints;
use crate::models::{
    Activity, ActivityKind, DifficultyLevel, LeaderboardEntry, User, Workout, WorkoutKind,
};

impl HttpResource<Users> {
    /// Users whose username contains `fragment` (case-insensitive on the server)
    pub async fn search_by_username(&self, fragment: &str) -> ApiResult<Vec<User>> {
        let url = self
            .client()
            .collection_action_url(Users::PATH, "by_username");
        let payload = self
            .client()
            .get_json(&url, &[("username", fragment.to_string())])
            .await?;
        Ok(collect_records(payload))
    }
}

impl HttpResource<Activities> {
    pub async fn by_user(&self, user_id: &str) -> ApiResult<Vec<Activity>> {
        let url = self
            .client()
            .collection_action_url(Activities::PATH, "by_user");
        let payload = self
            .client()
            .get_json(&url, &[("user_id", user_id.to_string())])
            .await?;
        Ok(collect_records(payload))
    }

    pub async fn by_kind(&self, kind: ActivityKind) -> ApiResult<Vec<Activity>> {
        let url = self
            .client()
            .collection_action_url(Activities::PATH, "by_type");
        let payload = self
            .client()
            .get_json(&url, &[("type", kind.to_string())])
            .await?;
        Ok(collect_records(payload))
    }
}

impl HttpResource<Teams> {
    pub async fn add_member(&self, team_id: &str, user_id: &str) -> ApiResult<Value> {
        self.member_action(team_id, "add_member", user_id).await
    }

    pub async fn remove_member(&self, team_id: &str, user_id: &str) -> ApiResult<Value> {
        self.member_action(team_id, "remove_member", user_id).await
    }

    async fn member_action(&self, team_id: &str, action: &str, user_id: &str) -> ApiResult<Value> {
        let url = self
            .client()
            .record_action_url(Teams::PATH, team_id, action);
        self.client()
            .send_json(Method::POST, &url, &json!({ "user_id": user_id }))
            .await
    }
}

impl HttpResource<Workouts> {
    pub async fn by_difficulty(&self, level: DifficultyLevel) -> ApiResult<Vec<Workout>> {
        let url = self
            .client()
            .collection_action_url(Workouts::PATH, "by_difficulty");
        let payload = self
            .client()
            .get_json(&url, &[("difficulty", level.to_string())])
            .await?;
        Ok(collect_records(payload))
    }

    pub async fn by_kind(&self, kind: WorkoutKind) -> ApiResult<Vec<Workout>> {
        let url = self
            .client()
            .collection_action_url(Workouts::PATH, "by_type");
        let payload = self
            .client()
            .get_json(&url, &[("type", kind.to_string())])
            .await?;
        Ok(collect_records(payload))
    }

    /// Workouts suggested from the user's recent activities
    pub async fn recommend(&self, user_id: &str) -> ApiResult<Vec<Workout>> {
        let url = self
            .client()
            .collection_action_url(Workouts::PATH, "recommend");
        let payload = self
            .client()
            .get_json(&url, &[("user_id", user_id.to_string())])
            .await?;
        Ok(collect_records(payload))
    }
}

impl ApiClient {
    /// First `limit` leaderboard entries, in server order
    pub async fn leaderboard_top(&self, limit: usize) -> ApiResult<Vec<LeaderboardEntry>> {
        let url = self.collection_action_url(endpoints::LEADERBOARD, "top");
        let payload = self.get_json(&url, &[("limit", limit.to_string())]).await?;
        Ok(collect_positional(payload))
    }

    /// Ask the server to recompute one user's aggregate entry
    pub async fn refresh_leaderboard_stats(&self, user_id: &str) -> ApiResult<LeaderboardEntry> {
        let url = self.collection_action_url(endpoints::LEADERBOARD, "update_stats");
        let payload = self
            .send_json(Method::POST, &url, &json!({ "user_id": user_id }))
            .await?;
        Ok(serde_json::from_value(payload)?)
    }
}
