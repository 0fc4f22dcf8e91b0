// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Derived views
//!
//! Presentations computed from one or more collections that are not
//! themselves persisted: team membership and the leaderboard.

pub mod leaderboard;
pub mod membership;
pub mod teams;

pub use leaderboard::{rank_entries, LeaderboardScreen, Podium, RankedRow};
pub use membership::{reconcile, team_emblem, TeamMembership};
pub use teams::TeamsScreen;
