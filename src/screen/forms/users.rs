// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::api::Users;
use crate::constants::limits::{MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};
use crate::constants::messages::INVALID_EMAIL;
use crate::models::{User, UserPayload};
use crate::screen::form::{
    optional_text, required, unknown_field, EditMode, EntityForm, FieldErrors, FormError,
    ScreenKind,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    /// Never pre-filled; empty on edit means keep the current password
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub team_id: String,
}

impl ScreenKind for Users {
    type Form = UserForm;
}

impl EntityForm<Users> for UserForm {
    const FIELDS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "username",
        "email",
        "password",
        "team_id",
    ];

    fn for_create(_today: NaiveDate) -> Self {
        Self::default()
    }

    fn from_record(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: String::new(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            team_id: user.team_id.clone().unwrap_or_default(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "username" => &self.username,
            "email" => &self.email,
            "password" => &self.password,
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "team_id" => &self.team_id,
            _ => return None,
        };
        Some(value.clone())
    }

    fn with_field(&self, name: &str, value: &str) -> Result<Self, FormError> {
        let mut next = self.clone();
        let slot = match name {
            "username" => &mut next.username,
            "email" => &mut next.email,
            "password" => &mut next.password,
            "first_name" => &mut next.first_name,
            "last_name" => &mut next.last_name,
            "team_id" => &mut next.team_id,
            _ => return Err(unknown_field("user", name)),
        };
        *slot = value.to_string();
        Ok(next)
    }

    fn to_payload(&self, mode: &EditMode) -> Result<UserPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = required(&mut errors, "first_name", &self.first_name);
        let last_name = required(&mut errors, "last_name", &self.last_name);
        let username = validate_username(&mut errors, &self.username);
        let email = validate_email(&mut errors, &self.email);
        let password = validate_password(&mut errors, &self.password, mode);

        if !errors.is_empty() {
            return Err(errors);
        }

        match (first_name, last_name, username, email) {
            (Some(first_name), Some(last_name), Some(username), Some(email)) => Ok(UserPayload {
                username,
                email,
                password,
                first_name,
                last_name,
                team_id: optional_text(&self.team_id),
            }),
            _ => Err(errors),
        }
    }
}

fn validate_username(errors: &mut FieldErrors, value: &str) -> Option<String> {
    let username = required(errors, "username", value)?;
    if username.chars().count() < MIN_USERNAME_LENGTH {
        errors.insert(
            "username",
            format!("Username must be at least {} characters", MIN_USERNAME_LENGTH),
        );
        return None;
    }
    Some(username)
}

fn validate_email(errors: &mut FieldErrors, value: &str) -> Option<String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

    let email = required(errors, "email", value)?;
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex"));

    if !regex.is_match(&email) {
        errors.insert("email", INVALID_EMAIL.to_string());
        return None;
    }
    Some(email)
}

/// `Ok(None)` on edit with an empty password: the field is left out of the payload
fn validate_password(errors: &mut FieldErrors, value: &str, mode: &EditMode) -> Option<String> {
    if value.is_empty() {
        if mode.is_create() {
            errors.insert("password", "Password is required".to_string());
        }
        return None;
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        );
        return None;
    }
    Some(value.to_string())
}
