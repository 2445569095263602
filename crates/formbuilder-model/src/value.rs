use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON-friendly representation of a field's current (default) value.
///
/// The enum is untagged so it maps directly onto the persisted
/// `string | number | boolean | string[]` shape. An absent value is modelled as
/// `Option::<FieldValue>::None` by the owning [`crate::Field`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Selected options of a checkbox group.
    List(Vec<String>),
}

impl FieldValue {
    /// The empty text value. Derived fields hold this when their formula is not computable.
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true for values a `required` rule treats as "nothing entered".
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Bool(b) => !b,
            FieldValue::Number(_) => false,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_shapes() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"["abc", 4.5, true, ["a", "b"]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::from("abc"),
                FieldValue::Number(4.5),
                FieldValue::Bool(true),
                FieldValue::List(vec!["a".to_string(), "b".to_string()]),
            ]
        );
    }

    #[test]
    fn blank_values() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::Bool(false).is_blank());
        assert!(FieldValue::List(Vec::new()).is_blank());
        assert!(!FieldValue::Number(0.0).is_blank());
        assert!(!FieldValue::from("x").is_blank());
    }
}
