use std::collections::BTreeMap;

use formbuilder_model::{
    validate_values, Field, FieldId, FieldValue, FormFields, FormSchema, ValueError,
};
use thiserror::Error;

use crate::eval::Evaluator;
use crate::graph::CycleError;
use crate::recalc::{recompute, RecalcError, RecalcReport, ValueChange};
use crate::settings::EngineSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecalcStatus {
    /// The last recompute reached a fixed point.
    Settled { passes: u32 },
    /// The last recompute hit the pass cap; derived values are whatever the last pass left.
    DidNotConverge {
        passes: u32,
        cycle: Option<CycleError>,
    },
}

impl RecalcStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, RecalcStatus::Settled { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown field: {0}")]
    UnknownField(FieldId),
    #[error("field {0} is derived; its value is computed from its parents")]
    DerivedFieldIsReadOnly(FieldId),
}

/// Owner of one open form being filled in.
///
/// All value edits go through the session, which recomputes derived fields synchronously
/// before returning, so at most one recompute is ever in flight per form.
#[derive(Debug, Clone)]
pub struct FormSession {
    fields: FormFields,
    evaluator: Evaluator,
    settings: EngineSettings,
    status: RecalcStatus,
    last_changes: Vec<ValueChange>,
}

impl FormSession {
    pub fn new(fields: Vec<Field>, settings: EngineSettings) -> Self {
        Self::with_evaluator(fields, Evaluator::new(), settings)
    }

    pub fn from_schema(schema: &FormSchema, settings: EngineSettings) -> Self {
        Self::new(schema.fields.clone(), settings)
    }

    /// Create a session and bring derived values up to date.
    pub fn with_evaluator(
        fields: Vec<Field>,
        evaluator: Evaluator,
        settings: EngineSettings,
    ) -> Self {
        let mut session = Self {
            fields: FormFields::from_fields(fields),
            evaluator,
            settings,
            status: RecalcStatus::Settled { passes: 0 },
            last_changes: Vec::new(),
        };
        session.recompute();
        session
    }

    pub fn fields(&self) -> &[Field] {
        self.fields.fields()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields.into_vec()
    }

    pub fn value(&self, id: &FieldId) -> Option<&FieldValue> {
        self.fields.field(id)?.default_value.as_ref()
    }

    pub fn status(&self) -> &RecalcStatus {
        &self.status
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Derived values overwritten by the most recent recompute.
    pub fn last_changes(&self) -> &[ValueChange] {
        &self.last_changes
    }

    /// Set a user-editable field's value and recompute derived fields.
    ///
    /// Setting a value equal to the current one is not a change and does not recompute.
    pub fn set_value(
        &mut self,
        id: &FieldId,
        value: Option<FieldValue>,
    ) -> Result<&RecalcStatus, SessionError> {
        let field = self
            .fields
            .field_mut(id)
            .ok_or_else(|| SessionError::UnknownField(id.clone()))?;
        if field.is_derived() {
            return Err(SessionError::DerivedFieldIsReadOnly(id.clone()));
        }
        if field.default_value == value {
            return Ok(&self.status);
        }
        field.default_value = value;
        Ok(self.recompute())
    }

    /// Run the recompute loop over the current fields.
    pub fn recompute(&mut self) -> &RecalcStatus {
        let fields = std::mem::take(&mut self.fields).into_vec();
        let (fields, changes, status) =
            match recompute(fields, &self.evaluator, &self.settings.recalc) {
                Ok(RecalcReport {
                    fields,
                    changes,
                    passes,
                }) => (fields, changes, RecalcStatus::Settled { passes }),
                Err(RecalcError::DidNotConverge {
                    passes,
                    fields,
                    changes,
                    cycle,
                }) => (fields, changes, RecalcStatus::DidNotConverge { passes, cycle }),
            };
        self.fields = FormFields::from_fields(fields);
        self.last_changes = changes;
        self.status = status;
        &self.status
    }

    /// Current value-validation errors, keyed by field id.
    pub fn errors(&self) -> BTreeMap<FieldId, ValueError> {
        validate_values(self.fields.fields())
    }

    /// A form can be submitted once every field validates and derived values have settled.
    pub fn can_submit(&self) -> bool {
        self.status.is_settled() && self.errors().is_empty()
    }
}
