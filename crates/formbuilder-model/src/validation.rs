use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

use crate::{Field, FieldId, FieldType, FieldValue};

/// Minimum length enforced by the `password` rule.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Why a field's current value fails its [`crate::ValidationRules`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Must be at most {max} characters")]
    TooLong { max: usize },
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password must be at least {PASSWORD_MIN_LEN} characters")]
    PasswordTooShort,
    #[error("Password must contain at least one number")]
    PasswordMissingDigit,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Check a single field's current value against its rules. The first failing rule wins.
pub fn validate_field_value(field: &Field) -> Option<ValueError> {
    let rules = &field.validations;
    let value = field.default_value.as_ref();

    if rules.is_required() && value.map_or(true, FieldValue::is_blank) {
        return Some(ValueError::Required);
    }

    let text = value.and_then(FieldValue::as_text).filter(|s| !s.is_empty());
    let Some(text) = text else {
        return None;
    };

    let len = text.chars().count();
    if let Some(min) = rules.min_length {
        if len < min {
            return Some(ValueError::TooShort { min });
        }
    }
    if let Some(max) = rules.max_length {
        if len > max {
            return Some(ValueError::TooLong { max });
        }
    }

    if field.field_type == FieldType::Text && rules.is_email() && !email_regex().is_match(text) {
        return Some(ValueError::InvalidEmail);
    }

    if matches!(field.field_type, FieldType::Text | FieldType::Password) && rules.is_password() {
        if len < PASSWORD_MIN_LEN {
            return Some(ValueError::PasswordTooShort);
        }
        if !text.chars().any(|c| c.is_ascii_digit()) {
            return Some(ValueError::PasswordMissingDigit);
        }
    }

    None
}

/// Validate every field, keyed by id. An empty map means the form can be submitted.
pub fn validate_values<'a>(
    fields: impl IntoIterator<Item = &'a Field>,
) -> BTreeMap<FieldId, ValueError> {
    fields
        .into_iter()
        .filter_map(|field| validate_field_value(field).map(|err| (field.id.clone(), err)))
        .collect()
}
