// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Records as the OctoFit API returns them, and the write payloads the
//! console submits.
//!
//! ## Design Principles
//!
//! - **Server-owned identity**: identifiers and timestamps are assigned by the
//!   server and never appear in write payloads
//! - **Tolerant reads**: optional and defaulted fields absorb partially
//!   populated records; the identifier is accepted as either `_id` or `id`,
//!   and identifiers may arrive as strings or numbers. Timestamps with or
//!   without an offset are read; unreadable ones become `None`. Enumeration
//!   labels match case-insensitively
//! - **Explicit writes**: optional values in payloads serialize as `null`
//!   rather than being left out. The one exception is the user password,
//!   which is omitted entirely when unchanged
//!
//! ## Core Models
//!
//! - [`User`], [`Team`], [`Activity`], [`Workout`]: CRUD-managed records
//! - [`LeaderboardEntry`]: read-only aggregate projection keyed by user
//! - [`ActivityKind`], [`WorkoutKind`], [`DifficultyLevel`]: fixed enumerations

use chrono::{DateTime, NaiveDate, Utc};
use chrono::NaiveDateTime;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "required_text")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Identifier of the team this user belongs to
    #[serde(default, deserialize_with = "lenient_text")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A team of users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(alias = "_id", deserialize_with = "required_text")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Identifier of the user who created the team
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,
    /// Server-computed member count; may disagree with locally loaded users
    #[serde(default)]
    pub member_count: Option<u32>,
    /// Member identifiers as stored on the team document
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub members: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A logged activity session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(alias = "_id", deserialize_with = "required_text")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub user_id: String,
    pub activity_type: ActivityKind,
    /// Minutes
    #[serde(default)]
    pub duration: Option<u32>,
    /// Kilometers
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub calories_burned: u32,
    /// Unparseable dates read as `None`
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A workout plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(alias = "_id", deserialize_with = "required_text")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Labels outside the fixed set read as `Other`
    #[serde(deserialize_with = "lenient_workout_kind")]
    pub activity_type: WorkoutKind,
    /// Minutes
    #[serde(default, alias = "estimated_duration")]
    pub target_duration: Option<u32>,
    /// Kilometers
    #[serde(default)]
    pub target_distance: Option<f64>,
    #[serde(default, alias = "estimated_calories")]
    pub target_calories: Option<u32>,
    /// Missing, null or unknown levels read as `Intermediate`
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty_level: DifficultyLevel,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of the server-side leaderboard
///
/// Every field is optional and no field value fails decoding: entries are
/// rendered even when partially populated, text fields accept strings or
/// numbers, and metrics accept integers, floats or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default, alias = "_id", deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub user_id: Option<String>,
    #[serde(default, alias = "user_name", deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_activities: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_calories: Option<u64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub total_distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_duration: Option<u64>,
}

/// Write payload for users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    /// Left out entirely when an edit keeps the current password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub team_id: Option<String>,
}

/// Write payload for teams
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPayload {
    pub name: String,
    pub description: String,
    pub created_by: Option<String>,
}

/// Write payload for activities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPayload {
    pub user_id: String,
    pub activity_type: ActivityKind,
    pub duration: u32,
    pub distance: Option<f64>,
    pub calories_burned: u32,
    pub date: NaiveDate,
    pub notes: String,
}

/// Write payload for workouts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutPayload {
    pub name: String,
    pub description: String,
    pub activity_type: WorkoutKind,
    pub target_duration: Option<u32>,
    pub target_distance: Option<f64>,
    pub target_calories: Option<u32>,
    pub difficulty_level: DifficultyLevel,
}

/// Kinds of logged activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActivityKind {
    Running,
    Cycling,
    Swimming,
    Weightlifting,
    Yoga,
    Boxing,
    Cardio,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 7] = [
        Self::Running,
        Self::Cycling,
        Self::Swimming,
        Self::Weightlifting,
        Self::Yoga,
        Self::Boxing,
        Self::Cardio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
            Self::Swimming => "Swimming",
            Self::Weightlifting => "Weightlifting",
            Self::Yoga => "Yoga",
            Self::Boxing => "Boxing",
            Self::Cardio => "Cardio",
        }
    }
}

/// Kinds of planned workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WorkoutKind {
    Running,
    Cycling,
    Swimming,
    Walking,
    Weightlifting,
    Yoga,
    Other,
}

impl WorkoutKind {
    pub const ALL: [WorkoutKind; 7] = [
        Self::Running,
        Self::Cycling,
        Self::Swimming,
        Self::Walking,
        Self::Weightlifting,
        Self::Yoga,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
            Self::Swimming => "Swimming",
            Self::Walking => "Walking",
            Self::Weightlifting => "Weightlifting",
            Self::Yoga => "Yoga",
            Self::Other => "Other",
        }
    }
}

/// Workout difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DifficultyLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Error for enumeration values outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labelled_enum {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            /// Case-insensitive match on the display label
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownVariant {
                        kind: $label,
                        value: s.to_string(),
                    })
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer)?
                    .parse()
                    .map_err(de::Error::custom)
            }
        }
    };
}

labelled_enum!(ActivityKind, "activity type");
labelled_enum!(WorkoutKind, "workout type");
labelled_enum!(DifficultyLevel, "difficulty level");

/// Identifier or name as sent by the server: text or a bare number
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Int(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl LooseText {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{:.0}", f)),
            Self::Float(f) if f.is_finite() => Some(f.to_string()),
            _ => None,
        }
    }
}

fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    LooseText::deserialize(deserializer)?
        .into_text()
        .ok_or_else(|| de::Error::custom("expected a string or number identifier"))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseText>::deserialize(deserializer).unwrap_or(None);
    Ok(raw.and_then(LooseText::into_text))
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Items that are neither text nor numbers are dropped
fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<LooseText>>::deserialize(deserializer).unwrap_or(None);
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(LooseText::into_text)
        .collect())
}

/// RFC 3339, or a naive timestamp taken as UTC
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer).unwrap_or(None);
    Ok(raw.and_then(|text| {
        let text = text.trim();
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                    .map(|naive| naive.and_utc())
            })
    }))
}

fn lenient_difficulty<'de, D>(deserializer: D) -> Result<DifficultyLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer).unwrap_or(None);
    Ok(raw
        .and_then(|label| label.parse().ok())
        .unwrap_or_default())
}

fn lenient_workout_kind<'de, D>(deserializer: D) -> Result<WorkoutKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer).unwrap_or(None);
    Ok(raw
        .and_then(|label| label.parse().ok())
        .unwrap_or(WorkoutKind::Other))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(u64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer).unwrap_or(None);
    Ok(raw
        .and_then(|n| n.as_f64())
        .filter(|f| f.is_finite()))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer).unwrap_or(None);
    Ok(match raw {
        Some(LooseNumber::Int(n)) => Some(n),
        Some(other) => other
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.round() as u64),
        None => None,
    })
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer).unwrap_or(None);
    Ok(raw.and_then(|text| {
        let text = text.trim();
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
    }))
}
