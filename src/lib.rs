// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # OctoFit Console
//!
//! Management console core for the OctoFit fitness-tracking service. It
//! keeps Users, Teams, Activities and Workouts in sync with the OctoFit REST
//! API and drives one list/edit screen per resource kind, plus two derived
//! views: team membership and the leaderboard.
//!
//! ## Features
//!
//! - **Origin resolution**: hosted workspace or local loopback, decided once
//!   from an explicit environment snapshot
//! - **Uniform resource client**: list, get, create, update and delete for
//!   every kind, with typed failures carrying the server's status and body
//! - **Shape-tolerant lists**: bare arrays and paginated envelopes decode the
//!   same way
//! - **Screen controllers**: immutable edit forms, client-side validation, a
//!   two-step delete and a full refetch after every mutation
//! - **Derived views**: team membership reconciliation and positional
//!   leaderboard ranking
//!
//! ## Architecture
//!
//! - **Api**: REST transport, resource kinds and collection normalization
//! - **Screen**: per-kind controllers, forms and display fields
//! - **Views**: membership and leaderboard composition
//! - **Config**: environment snapshot and optional TOML settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use octofit_console::api::ApiClient;
//! use octofit_console::config::{Config, Environment};
//! use octofit_console::screen::{CrudScreen, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let env = Environment::capture();
//!     let config = Config::load(None)?;
//!     let client = ApiClient::from_config(&config, &env);
//!
//!     let mut activities = CrudScreen::new(client.activities());
//!     activities.load().await;
//!
//!     activities.open_create();
//!     activities.edit_field("user_id", "65a1f0c2e4b0a1b2c3d4e5f6")?;
//!     activities.edit_field("duration", "30")?;
//!     activities.edit_field("calories_burned", "300")?;
//!
//!     if activities.submit().await == SubmitOutcome::Saved {
//!         println!("{} activities", activities.records().len());
//!     }
//!     Ok(())
//! }
//! ```

/// REST client, resource kinds and list normalization
pub mod api;

/// Configuration management and persistence
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// API origin resolution
pub mod endpoint;

/// Production logging and structured output
pub mod logging;

/// Records and write payloads
pub mod models;

/// Per-kind list/edit screens
pub mod screen;

/// Team membership and leaderboard views
pub mod views;

#[cfg(test)]
pub(crate) mod testing;
