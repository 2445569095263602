use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{FieldValue, DEFAULT_OPTIONS};

/// Stable identifier of a [`Field`].
///
/// Ids are assigned once when a field is created and are never reused; derived field configs
/// address their parents exclusively through them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Allocate a fresh, globally unique id.
    pub fn generate() -> Self {
        Self(crate::new_uuid().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
    Password,
}

impl FieldType {
    /// Select, radio and checkbox fields carry an option list; other types never do.
    #[must_use]
    pub fn has_options(self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio | FieldType::Checkbox)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::Password => "password",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field input rules checked when a form is filled in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<bool>,
}

impl ValidationRules {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn is_email(&self) -> bool {
        self.email.unwrap_or(false)
    }

    pub fn is_password(&self) -> bool {
        self.password.unwrap_or(false)
    }

    pub(crate) fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Marks a field as derived: its value is computed from `parents` through `formula`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFieldConfig {
    pub parents: Vec<FieldId>,
    pub formula: String,
}

impl DerivedFieldConfig {
    pub fn new(parents: Vec<FieldId>, formula: impl Into<String>) -> Self {
        Self {
            parents,
            formula: formula.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "ValidationRules::is_default")]
    pub validations: ValidationRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived: Option<DerivedFieldConfig>,
}

impl Field {
    /// Create a field with a freshly generated id.
    ///
    /// Option-bearing types start out with [`DEFAULT_OPTIONS`].
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self::with_id(FieldId::generate(), field_type, label)
    }

    pub fn with_id(id: impl Into<FieldId>, field_type: FieldType, label: impl Into<String>) -> Self {
        let options = if field_type.has_options() {
            DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect()
        } else {
            Vec::new()
        };
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            default_value: None,
            options,
            validations: ValidationRules::default(),
            derived: None,
        }
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn validations(mut self, validations: ValidationRules) -> Self {
        self.validations = validations;
        self
    }

    #[must_use]
    pub fn derived(mut self, parents: Vec<FieldId>, formula: impl Into<String>) -> Self {
        self.derived = Some(DerivedFieldConfig::new(parents, formula));
        self
    }

    pub fn is_derived(&self) -> bool {
        self.derived.is_some()
    }

    /// Ids this field reads from. Empty for non-derived fields.
    pub fn parents(&self) -> &[FieldId] {
        self.derived
            .as_ref()
            .map(|d| d.parents.as_slice())
            .unwrap_or_default()
    }
}
