use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Field, FieldId, FieldValue};

/// A saved form definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: crate::new_uuid().to_string(),
            name: name.into(),
            created_at: Utc::now(),
            fields,
        }
    }
}

/// Ordered field collection being edited.
///
/// This is the single writer for structural changes (add/update/delete/reorder) and owns the
/// cascading integrity rule: deleting a field removes its id from every derived config.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    fields: Vec<Field>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_vec(self) -> Vec<Field> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    pub fn field_mut(&mut self, id: &FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| &f.id == id)
    }

    /// Append a field and return its id.
    pub fn add_field(&mut self, field: Field) -> FieldId {
        let id = field.id.clone();
        self.fields.push(field);
        id
    }

    /// Replace the field with the same id. Returns `false` if no such field exists.
    pub fn update_field(&mut self, field: Field) -> bool {
        let Some(slot) = self.field_mut(&field.id) else {
            return false;
        };
        *slot = field;
        true
    }

    /// Set the current value of a field. Returns `false` if no such field exists.
    pub fn set_value(&mut self, id: &FieldId, value: Option<FieldValue>) -> bool {
        let Some(field) = self.field_mut(id) else {
            return false;
        };
        field.default_value = value;
        true
    }

    /// Remove a field and scrub its id from every other field's parent list.
    pub fn delete_field(&mut self, id: &FieldId) -> Option<Field> {
        let index = self.fields.iter().position(|f| &f.id == id)?;
        let removed = self.fields.remove(index);

        for field in &mut self.fields {
            if let Some(derived) = field.derived.as_mut() {
                derived.parents.retain(|parent| parent != id);
            }
        }

        Some(removed)
    }

    /// Move the field at `from` to position `to`.
    ///
    /// Returns `false` (leaving the order untouched) if either index is out of range.
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> bool {
        if from >= self.fields.len() || to >= self.fields.len() {
            return false;
        }
        if from == to {
            return true;
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        true
    }

    pub fn reset(&mut self) {
        self.fields.clear();
    }
}

impl From<Vec<Field>> for FormFields {
    fn from(fields: Vec<Field>) -> Self {
        Self::from_fields(fields)
    }
}

impl<'a> IntoIterator for &'a FormFields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
