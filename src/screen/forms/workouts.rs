// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::NaiveDate;

use crate::api::Workouts;
use crate::models::{DifficultyLevel, Workout, WorkoutKind, WorkoutPayload};
use crate::screen::form::{
    number_text, optional_count, optional_decimal, required, unknown_field, EditMode, EntityForm,
    FieldErrors, FormError, ScreenKind,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    pub name: String,
    pub description: String,
    pub activity_type: WorkoutKind,
    pub target_duration: String,
    pub target_distance: String,
    pub target_calories: String,
    pub difficulty_level: DifficultyLevel,
}

impl ScreenKind for Workouts {
    type Form = WorkoutForm;
}

impl EntityForm<Workouts> for WorkoutForm {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "description",
        "activity_type",
        "difficulty_level",
        "target_duration",
        "target_distance",
        "target_calories",
    ];

    fn for_create(_today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            activity_type: WorkoutKind::Running,
            target_duration: String::new(),
            target_distance: String::new(),
            target_calories: String::new(),
            difficulty_level: DifficultyLevel::Intermediate,
        }
    }

    fn from_record(workout: &Workout) -> Self {
        Self {
            name: workout.name.clone(),
            description: workout.description.clone().unwrap_or_default(),
            activity_type: workout.activity_type,
            target_duration: number_text(workout.target_duration),
            target_distance: number_text(workout.target_distance),
            target_calories: number_text(workout.target_calories),
            difficulty_level: workout.difficulty_level,
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "activity_type" => self.activity_type.to_string(),
            "target_duration" => self.target_duration.clone(),
            "target_distance" => self.target_distance.clone(),
            "target_calories" => self.target_calories.clone(),
            "difficulty_level" => self.difficulty_level.to_string(),
            _ => return None,
        };
        Some(value)
    }

    fn with_field(&self, name: &str, value: &str) -> Result<Self, FormError> {
        let mut next = self.clone();
        match name {
            "name" => next.name = value.to_string(),
            "description" => next.description = value.to_string(),
            "activity_type" => {
                next.activity_type = value.parse().map_err(|_| FormError::InvalidChoice {
                    field: "activity_type",
                    value: value.to_string(),
                })?
            }
            "target_duration" => next.target_duration = value.to_string(),
            "target_distance" => next.target_distance = value.to_string(),
            "target_calories" => next.target_calories = value.to_string(),
            "difficulty_level" => {
                next.difficulty_level = value.parse().map_err(|_| FormError::InvalidChoice {
                    field: "difficulty_level",
                    value: value.to_string(),
                })?
            }
            _ => return Err(unknown_field("workout", name)),
        }
        Ok(next)
    }

    fn to_payload(&self, _mode: &EditMode) -> Result<WorkoutPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required(&mut errors, "name", &self.name);
        let target_duration = optional_count(&mut errors, "target_duration", &self.target_duration);
        let target_distance = optional_decimal(&mut errors, "target_distance", &self.target_distance);
        let target_calories = optional_count(&mut errors, "target_calories", &self.target_calories);

        match name {
            Some(name) if errors.is_empty() => Ok(WorkoutPayload {
                name,
                description: self.description.trim().to_string(),
                activity_type: self.activity_type,
                target_duration,
                target_distance,
                target_calories,
                difficulty_level: self.difficulty_level,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let form = WorkoutForm::for_create(today());
        assert_eq!(form.activity_type, WorkoutKind::Running);
        assert_eq!(form.difficulty_level, DifficultyLevel::Intermediate);
    }

    #[test]
    fn test_unset_targets_sent_as_null() {
        let form = WorkoutForm::for_create(today())
            .with_field("name", "Recovery Walk")
            .and_then(|f| f.with_field("activity_type", "Walking"))
            .and_then(|f| f.with_field("target_duration", "40"))
            .unwrap();

        let payload = form.to_payload(&EditMode::Create).unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["activity_type"], "Walking");
        assert_eq!(value["target_duration"], 40);
        assert_eq!(value["target_distance"], serde_json::Value::Null);
        assert_eq!(value["target_calories"], serde_json::Value::Null);
        assert_eq!(value["difficulty_level"], "Intermediate");
    }

    #[test]
    fn test_bad_targets_rejected() {
        let form = WorkoutForm::for_create(today())
            .with_field("name", "Intervals")
            .and_then(|f| f.with_field("target_distance", "far"))
            .and_then(|f| f.with_field("target_calories", "-100"))
            .unwrap();

        let errors = form.to_payload(&EditMode::Create).unwrap_err();
        assert!(errors.contains_key("target_distance"));
        assert!(errors.contains_key("target_calories"));
        assert!(!errors.contains_key("name"));
    }

    #[test]
    fn test_invalid_difficulty_choice() {
        let form = WorkoutForm::for_create(today());
        assert!(form.with_field("difficulty_level", "Legendary").is_err());
        assert_eq!(
            form.with_field("difficulty_level", "beginner")
                .unwrap()
                .difficulty_level,
            DifficultyLevel::Beginner
        );
    }
}
