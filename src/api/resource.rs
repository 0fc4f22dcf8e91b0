// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resource kinds and the uniform CRUD contract

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

use super::error::ApiResult;
use crate::models::{
    Activity, ActivityPayload, LeaderboardEntry, Team, TeamPayload, User, UserPayload, Workout,
    WorkoutPayload,
};

/// A category of CRUD-managed entity
pub trait ResourceKind: Send + Sync + 'static {
    type Record: DeserializeOwned + Serialize + Clone + Debug + Send + Sync;
    type Payload: Serialize + Clone + Debug + Send + Sync;

    /// Collection path segment, e.g. `users`
    const PATH: &'static str;
    /// Singular label used in messages, e.g. `user`
    const SINGULAR: &'static str;
    /// Plural label used in messages, e.g. `users`
    const PLURAL: &'static str;

    fn record_id(record: &Self::Record) -> &str;
}

pub struct Users;
pub struct Teams;
pub struct Activities;
pub struct Workouts;

impl ResourceKind for Users {
    type Record = User;
    type Payload = UserPayload;
    const PATH: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn record_id(record: &User) -> &str {
        &record.id
    }
}

impl ResourceKind for Teams {
    type Record = Team;
    type Payload = TeamPayload;
    const PATH: &'static str = "teams";
    const SINGULAR: &'static str = "team";
    const PLURAL: &'static str = "teams";

    fn record_id(record: &Team) -> &str {
        &record.id
    }
}

impl ResourceKind for Activities {
    type Record = Activity;
    type Payload = ActivityPayload;
    const PATH: &'static str = "activities";
    const SINGULAR: &'static str = "activity";
    const PLURAL: &'static str = "activities";

    fn record_id(record: &Activity) -> &str {
        &record.id
    }
}

impl ResourceKind for Workouts {
    type Record = Workout;
    type Payload = WorkoutPayload;
    const PATH: &'static str = "workouts";
    const SINGULAR: &'static str = "workout";
    const PLURAL: &'static str = "workouts";

    fn record_id(record: &Workout) -> &str {
        &record.id
    }
}

/// The five operations every resource kind supports
///
/// `create` and `update` hand back the raw success payload; callers
/// resynchronize with `list` rather than trusting it.
#[async_trait]
pub trait ResourceApi<K: ResourceKind>: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<K::Record>>;

    async fn get(&self, id: &str) -> ApiResult<K::Record>;

    async fn create(&self, payload: &K::Payload) -> ApiResult<Value>;

    async fn update(&self, id: &str, payload: &K::Payload) -> ApiResult<Value>;

    async fn delete(&self, id: &str) -> ApiResult<()>;
}

/// Read access to the pre-aggregated leaderboard
#[async_trait]
pub trait LeaderboardApi: Send + Sync {
    async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>>;
}
