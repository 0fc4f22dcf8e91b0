// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::NaiveDate;

use crate::api::Activities;
use crate::models::{Activity, ActivityKind, ActivityPayload};
use crate::screen::form::{
    number_text, optional_decimal, required, required_count, unknown_field, EditMode, EntityForm,
    FieldErrors, FormError, ScreenKind,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityForm {
    pub user_id: String,
    pub activity_type: ActivityKind,
    /// Minutes, as typed
    pub duration: String,
    /// Kilometers, as typed
    pub distance: String,
    pub calories_burned: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub notes: String,
}

impl ScreenKind for Activities {
    type Form = ActivityForm;
}

impl EntityForm<Activities> for ActivityForm {
    const FIELDS: &'static [&'static str] = &[
        "user_id",
        "activity_type",
        "duration",
        "distance",
        "calories_burned",
        "date",
        "notes",
    ];

    fn for_create(today: NaiveDate) -> Self {
        Self {
            user_id: String::new(),
            activity_type: ActivityKind::Running,
            duration: String::new(),
            distance: String::new(),
            calories_burned: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            notes: String::new(),
        }
    }

    fn from_record(activity: &Activity) -> Self {
        Self {
            user_id: activity.user_id.clone(),
            activity_type: activity.activity_type,
            duration: number_text(activity.duration),
            distance: number_text(activity.distance),
            calories_burned: activity.calories_burned.to_string(),
            date: activity
                .date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            notes: activity.notes.clone().unwrap_or_default(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "user_id" => self.user_id.clone(),
            "activity_type" => self.activity_type.to_string(),
            "duration" => self.duration.clone(),
            "distance" => self.distance.clone(),
            "calories_burned" => self.calories_burned.clone(),
            "date" => self.date.clone(),
            "notes" => self.notes.clone(),
            _ => return None,
        };
        Some(value)
    }

    fn with_field(&self, name: &str, value: &str) -> Result<Self, FormError> {
        let mut next = self.clone();
        match name {
            "user_id" => next.user_id = value.to_string(),
            "activity_type" => {
                next.activity_type = value.parse().map_err(|_| FormError::InvalidChoice {
                    field: "activity_type",
                    value: value.to_string(),
                })?
            }
            "duration" => next.duration = value.to_string(),
            "distance" => next.distance = value.to_string(),
            "calories_burned" => next.calories_burned = value.to_string(),
            "date" => next.date = value.to_string(),
            "notes" => next.notes = value.to_string(),
            _ => return Err(unknown_field("activity", name)),
        }
        Ok(next)
    }

    fn to_payload(&self, _mode: &EditMode) -> Result<ActivityPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let user_id = required(&mut errors, "user_id", &self.user_id);
        let duration = required_count(&mut errors, "duration", &self.duration, 1);
        let distance = optional_decimal(&mut errors, "distance", &self.distance);
        let calories = required_count(&mut errors, "calories_burned", &self.calories_burned, 0);
        let date = required(&mut errors, "date", &self.date).and_then(|text| {
            match NaiveDate::parse_from_str(&text, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.insert("date", "Date must be in YYYY-MM-DD format".to_string());
                    None
                }
            }
        });

        match (user_id, duration, calories, date) {
            (Some(user_id), Some(duration), Some(calories_burned), Some(date)) if errors.is_empty() => {
                Ok(ActivityPayload {
                    user_id,
                    activity_type: self.activity_type,
                    duration,
                    distance,
                    calories_burned,
                    date,
                    notes: self.notes.trim().to_string(),
                })
            }
            _ => Err(errors),
        }
    }
}
