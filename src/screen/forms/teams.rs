// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::NaiveDate;

use crate::api::Teams;
use crate::models::{Team, TeamPayload};
use crate::screen::form::{
    optional_text, required, unknown_field, EditMode, EntityForm, FieldErrors, FormError,
    ScreenKind,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamForm {
    pub name: String,
    pub description: String,
    /// User identifier of the creator
    pub created_by: String,
}

impl ScreenKind for Teams {
    type Form = TeamForm;
}

impl EntityForm<Teams> for TeamForm {
    const FIELDS: &'static [&'static str] = &["name", "description", "created_by"];

    fn for_create(_today: NaiveDate) -> Self {
        Self::default()
    }

    fn from_record(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            description: team.description.clone().unwrap_or_default(),
            created_by: team.created_by.clone().unwrap_or_default(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "description" => Some(self.description.clone()),
            "created_by" => Some(self.created_by.clone()),
            _ => None,
        }
    }

    fn with_field(&self, name: &str, value: &str) -> Result<Self, FormError> {
        let mut next = self.clone();
        match name {
            "name" => next.name = value.to_string(),
            "description" => next.description = value.to_string(),
            "created_by" => next.created_by = value.to_string(),
            _ => return Err(unknown_field("team", name)),
        }
        Ok(next)
    }

    fn to_payload(&self, _mode: &EditMode) -> Result<TeamPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        match required(&mut errors, "name", &self.name) {
            Some(name) => Ok(TeamPayload {
                name,
                description: self.description.trim().to_string(),
                created_by: optional_text(&self.created_by),
            }),
            None => Err(errors),
        }
    }
}
