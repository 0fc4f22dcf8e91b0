// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Derived display fields
//!
//! Pure functions of a record. Nothing here is sent back to the server.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use crate::constants::messages::{NOT_AVAILABLE, NO_DESCRIPTION, NO_NOTES, NO_TEAM, TEAM_MEMBER};
use crate::models::{Activity, ActivityKind, DifficultyLevel, Team, User, Workout, WorkoutKind};

/// Visual category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Dark,
}

impl BadgeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn activity_badge(kind: ActivityKind) -> BadgeVariant {
    match kind {
        ActivityKind::Running => BadgeVariant::Primary,
        ActivityKind::Cycling => BadgeVariant::Success,
        ActivityKind::Swimming => BadgeVariant::Info,
        ActivityKind::Weightlifting => BadgeVariant::Danger,
        ActivityKind::Yoga => BadgeVariant::Secondary,
        ActivityKind::Boxing => BadgeVariant::Warning,
        ActivityKind::Cardio => BadgeVariant::Dark,
    }
}

pub fn workout_badge(kind: WorkoutKind) -> BadgeVariant {
    match kind {
        WorkoutKind::Running => BadgeVariant::Primary,
        WorkoutKind::Cycling => BadgeVariant::Success,
        WorkoutKind::Swimming => BadgeVariant::Info,
        WorkoutKind::Walking => BadgeVariant::Warning,
        WorkoutKind::Weightlifting => BadgeVariant::Danger,
        WorkoutKind::Yoga => BadgeVariant::Secondary,
        WorkoutKind::Other => BadgeVariant::Dark,
    }
}

pub fn difficulty_badge(level: DifficultyLevel) -> BadgeVariant {
    match level {
        DifficultyLevel::Beginner => BadgeVariant::Success,
        DifficultyLevel::Intermediate => BadgeVariant::Warning,
        DifficultyLevel::Advanced => BadgeVariant::Danger,
    }
}

/// `Jan 5, 2026`, or `N/A`
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    format_date(ts.map(|t| t.date_naive()))
}

pub fn full_name(user: &User) -> String {
    let name = format!("{} {}", user.first_name.trim(), user.last_name.trim());
    let name = name.trim();
    if name.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        name.to_string()
    }
}

/// "Team Member" or "No Team"
pub fn team_tag(user: &User) -> &'static str {
    match user.team_id.as_deref() {
        Some(id) if !id.trim().is_empty() => TEAM_MEMBER,
        _ => NO_TEAM,
    }
}

fn or_placeholder<T: fmt::Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v, unit),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Tabular rendering of one record
pub trait DisplayRow {
    const COLUMNS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

impl DisplayRow for User {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Username", "Email", "Team", "Joined"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            full_name(self),
            self.username.clone(),
            self.email.clone(),
            team_tag(self).to_string(),
            format_timestamp(self.created_at),
        ]
    }
}

impl DisplayRow for Team {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Description", "Created"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            text_or(self.description.as_deref(), NO_DESCRIPTION),
            format_timestamp(self.created_at),
        ]
    }
}

impl DisplayRow for Activity {
    const COLUMNS: &'static [&'static str] = &[
        "ID", "User", "Type", "Duration", "Distance", "Calories", "Date", "Notes",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.user_id.clone(),
            format!("{} [{}]", self.activity_type, activity_badge(self.activity_type)),
            or_placeholder(self.duration, " min"),
            or_placeholder(self.distance, " km"),
            self.calories_burned.to_string(),
            format_date(self.date),
            text_or(self.notes.as_deref(), NO_NOTES),
        ]
    }
}

impl DisplayRow for Workout {
    const COLUMNS: &'static [&'static str] = &[
        "ID", "Name", "Type", "Difficulty", "Duration", "Distance", "Calories", "Description",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            format!("{} [{}]", self.activity_type, workout_badge(self.activity_type)),
            format!("{} [{}]", self.difficulty_level, difficulty_badge(self.difficulty_level)),
            or_placeholder(self.target_duration, " min"),
            or_placeholder(self.target_distance, " km"),
            or_placeholder(self.target_calories, " cal"),
            text_or(self.description.as_deref(), NO_DESCRIPTION),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str, team: Option<&str>) -> User {
        User {
            id: "u1".to_string(),
            username: "widow".to_string(),
            email: "natasha@shield.org".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            team_id: team.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn test_badges_cover_every_kind() {
        assert_eq!(activity_badge(ActivityKind::Running), BadgeVariant::Primary);
        assert_eq!(activity_badge(ActivityKind::Cardio), BadgeVariant::Dark);
        assert_eq!(workout_badge(WorkoutKind::Other).as_str(), "dark");
        assert_eq!(difficulty_badge(DifficultyLevel::Beginner), BadgeVariant::Success);
        assert_eq!(difficulty_badge(DifficultyLevel::Advanced).to_string(), "danger");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2026, 1, 5)), "Jan 5, 2026");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn test_full_name_and_team_tag() {
        assert_eq!(full_name(&user("Natasha", "Romanoff", None)), "Natasha Romanoff");
        assert_eq!(full_name(&user(" ", "", None)), "N/A");
        assert_eq!(full_name(&user("Natasha", "", None)), "Natasha");

        assert_eq!(team_tag(&user("a", "b", Some("t1"))), TEAM_MEMBER);
        assert_eq!(team_tag(&user("a", "b", Some(""))), NO_TEAM);
        assert_eq!(team_tag(&user("a", "b", None)), NO_TEAM);
    }

    #[test]
    fn test_activity_row_placeholders() {
        let activity = Activity {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            activity_type: ActivityKind::Swimming,
            duration: None,
            distance: Some(1.5),
            calories_burned: 200,
            date: None,
            notes: Some("  ".to_string()),
            created_at: None,
        };
        let row = activity.row();

        assert_eq!(row.len(), Activity::COLUMNS.len());
        assert_eq!(row[2], "Swimming [info]");
        assert_eq!(row[3], "N/A");
        assert_eq!(row[4], "1.5 km");
        assert_eq!(row[6], "N/A");
        assert_eq!(row[7], "-");
    }

    #[test]
    fn test_team_row_without_description() {
        let team = Team {
            id: "t1".to_string(),
            name: "Avengers".to_string(),
            description: None,
            created_by: None,
            member_count: None,
            members: Vec::new(),
            created_at: None,
        };
        assert_eq!(team.row()[2], NO_DESCRIPTION);
    }
}
