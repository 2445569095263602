//! Value coercions shared by the validator and the evaluator.
//!
//! Both sides must agree on what counts as numeric, so every numeric decision goes through
//! [`coerce_number`].

use formbuilder_model::{Field, FieldType, FieldValue};

/// Interpret a value as a finite number.
///
/// Numbers pass through; text is trimmed and parsed. Blank text, booleans, lists and
/// non-finite results are not numeric.
pub fn coerce_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        FieldValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        FieldValue::Bool(_) | FieldValue::List(_) => None,
    }
}

/// Text content of a value, for functions that only operate on strings.
pub fn coerce_text(value: &FieldValue) -> Option<&str> {
    value.as_text()
}

/// Text used when a value is joined into a string (e.g. by `concat`).
pub fn to_display_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => format_number(*n),
        other => other.to_string(),
    }
}

/// Whether a field may feed a numeric function: it is a `number` field, or its current
/// value is numeric.
pub fn is_numeric_field(field: &Field) -> bool {
    field.field_type == FieldType::Number
        || field.default_value.as_ref().and_then(coerce_number).is_some()
}

/// Render a number the way derived values are displayed: integral values without a fraction
/// and no negative zero.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, use the shortest exponent form with an
/// explicit sign (`1e+21`, `1.5e-7`); everything else is plain decimal.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude.is_finite() && (magnitude >= 1e21 || magnitude < 1e-6) {
        let sci = format!("{n:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => sci,
        };
    }
    format!("{n}")
}
