//! `formbuilder-model` defines the core in-memory form schema data structures.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the derived-field engine (formula validation, evaluation, recompute)
//! - form editing/preview hosts that persist schemas as JSON via `serde`

mod field;
mod form;
mod validation;
mod value;

pub use field::{DerivedFieldConfig, Field, FieldId, FieldType, ValidationRules};
pub use form::{FormFields, FormSchema};
pub use validation::{validate_field_value, validate_values, ValueError, PASSWORD_MIN_LEN};
pub use value::FieldValue;

/// Option list seeded into freshly created select/radio/checkbox fields.
pub const DEFAULT_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];

fn new_uuid() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}
