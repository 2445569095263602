use std::collections::HashMap;

use formbuilder_model::{Field, FieldId, FieldValue};

/// Immutable mapping from field id to current value, captured once per recompute pass.
///
/// Fields without a value are simply missing, so lookups of absent values and of unknown
/// (e.g. deleted) ids behave the same.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueSnapshot {
    values: HashMap<FieldId, FieldValue>,
}

impl ValueSnapshot {
    pub fn capture<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Self {
        let values = fields
            .into_iter()
            .filter_map(|field| {
                field
                    .default_value
                    .as_ref()
                    .map(|value| (field.id.clone(), value.clone()))
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, id: &FieldId) -> Option<&FieldValue> {
        self.values.get(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(FieldId, FieldValue)> for ValueSnapshot {
    fn from_iter<I: IntoIterator<Item = (FieldId, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
