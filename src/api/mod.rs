// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! REST access to the OctoFit API
//!
//! Every resource kind is reached through the same contract
//! ([`ResourceApi`]): list, get, create, update and delete, each one network
//! round trip with no local caching.

mod actions;
pub mod client;
pub mod error;
pub mod normalize;
pub mod resource;

pub use client::{ApiClient, HttpResource};
pub use error::{ApiError, ApiResult};
pub use normalize::{collect_positional, collect_records, decode_records, normalize_collection};
pub use resource::{Activities, LeaderboardApi, ResourceApi, ResourceKind, Teams, Users, Workouts};
