// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Edit-form contract shared by every entity screen
//!
//! A form is an immutable value: each field change produces a new form that
//! replaces the old one wholesale. Field-level validation messages live in a
//! separate map owned by the editor.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::api::ResourceKind;
use crate::constants::messages::FIELD_REQUIRED;

/// Validation messages keyed by field name
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Whether the editor creates a new record or updates an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Update { id: String },
}

impl EditMode {
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }

    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Update { id } => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Unknown field `{field}` on the {kind} form")]
    UnknownField { kind: &'static str, field: String },

    #[error("Invalid choice for `{field}`: {value}")]
    InvalidChoice { field: &'static str, value: String },
}

/// Form state for one resource kind
pub trait EntityForm<K: ResourceKind>: Clone + Debug + PartialEq + Send + Sync + Sized {
    /// Field names in display order
    const FIELDS: &'static [&'static str];

    /// Fixed defaults for a new record
    fn for_create(today: NaiveDate) -> Self;

    /// Pre-populated from an existing record
    fn from_record(record: &K::Record) -> Self;

    /// Current text of a field, as an input control would show it
    fn field(&self, name: &str) -> Option<String>;

    /// A new form with one field replaced
    fn with_field(&self, name: &str, value: &str) -> Result<Self, FormError>;

    /// Validate and parse into the outgoing payload
    fn to_payload(&self, mode: &EditMode) -> Result<K::Payload, FieldErrors>;
}

/// A resource kind that has an edit form
pub trait ScreenKind: ResourceKind + Sized {
    type Form: EntityForm<Self>;
}

pub(crate) fn unknown_field(kind: &'static str, field: &str) -> FormError {
    FormError::UnknownField {
        kind,
        field: field.to_string(),
    }
}

/// Trimmed value, or a "required" message
pub(crate) fn required(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, FIELD_REQUIRED.to_string());
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Empty text becomes `None`
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Required whole number no smaller than `min`
pub(crate) fn required_count(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    min: u32,
) -> Option<u32> {
    let text = required(errors, field, value)?;
    match text.parse::<u32>() {
        Ok(n) if n >= min => Some(n),
        _ => {
            errors.insert(field, format!("Must be a whole number of at least {}", min));
            None
        }
    }
}

/// Optional non-negative whole number; empty text is `None`
pub(crate) fn optional_count(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<u32> {
    let text = optional_text(value)?;
    match text.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.insert(field, "Must be a whole number of at least 0".to_string());
            None
        }
    }
}

/// Optional non-negative decimal; empty text is `None`
pub(crate) fn optional_decimal(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<f64> {
    let text = optional_text(value)?;
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Some(n),
        _ => {
            errors.insert(field, "Must be a number of at least 0".to_string());
            None
        }
    }
}

/// Text for an optional number in an input control
pub(crate) fn number_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        let mut errors = FieldErrors::new();
        assert_eq!(required(&mut errors, "name", "  Avengers "), Some("Avengers".to_string()));
        assert!(errors.is_empty());

        assert_eq!(required(&mut errors, "name", "   "), None);
        assert_eq!(errors.get("name").map(String::as_str), Some(FIELD_REQUIRED));
    }

    #[test]
    fn test_required_count_bounds() {
        let mut errors = FieldErrors::new();
        assert_eq!(required_count(&mut errors, "duration", "30", 1), Some(30));
        assert_eq!(required_count(&mut errors, "duration", "0", 1), None);
        assert!(errors.contains_key("duration"));

        let mut errors = FieldErrors::new();
        assert_eq!(required_count(&mut errors, "calories", "-5", 0), None);
        assert_eq!(required_count(&mut errors, "calories", "abc", 0), None);
        assert!(errors.contains_key("calories"));
    }

    #[test]
    fn test_optional_numbers() {
        let mut errors = FieldErrors::new();
        assert_eq!(optional_decimal(&mut errors, "distance", ""), None);
        assert_eq!(optional_decimal(&mut errors, "distance", "5.25"), Some(5.25));
        assert_eq!(optional_count(&mut errors, "target", " "), None);
        assert_eq!(optional_count(&mut errors, "target", "12"), Some(12));
        assert!(errors.is_empty());

        assert_eq!(optional_decimal(&mut errors, "distance", "-1"), None);
        assert_eq!(optional_decimal(&mut errors, "distance", "NaN"), None);
        assert_eq!(optional_count(&mut errors, "target", "1.5"), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_edit_mode_accessors() {
        assert!(EditMode::Create.is_create());
        assert_eq!(EditMode::Create.target_id(), None);
        let update = EditMode::Update { id: "u1".to_string() };
        assert!(!update.is_create());
        assert_eq!(update.target_id(), Some("u1"));
    }

    fn form_fields<K: ScreenKind>() -> &'static [&'static str] {
        <K::Form as EntityForm<K>>::FIELDS
    }

    #[test]
    fn test_every_screen_kind_names_its_fields() {
        use crate::api::{Activities, Teams, Users, Workouts};

        assert!(form_fields::<Users>().contains(&"password"));
        assert!(form_fields::<Teams>().contains(&"created_by"));
        assert!(form_fields::<Activities>().contains(&"calories_burned"));
        assert!(form_fields::<Workouts>().contains(&"difficulty_level"));
    }
}
