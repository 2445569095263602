use formbuilder_model::{DerivedFieldConfig, Field, FieldId, FieldType, FormFields};
use thiserror::Error;

use crate::coercion::{coerce_text, is_numeric_field};
use crate::date::parse_date_like;
use crate::functions::{lookup_function, supported_function_names, ParentType};
use crate::graph::{CycleError, ParentGraph};
use crate::parser::{parse_formula, ParseError};
use crate::settings::ValidationOptions;

/// Why a candidate derived-field config was rejected. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivedFieldError {
    #[error("Please select at least one parent field.")]
    EmptySelection,

    #[error("A field cannot be its own parent.")]
    SelfReference { field: FieldId },

    #[error("Parent field '{parent}' no longer exists.")]
    UnknownParent { parent: FieldId },

    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("Unsupported function '{name}'. Supported: {}", .supported.join(", "))]
    UnsupportedFunction {
        name: String,
        supported: Vec<&'static str>,
    },

    #[error("{function}() requires exactly one parent field, but {actual} were selected.")]
    Arity {
        function: &'static str,
        actual: usize,
    },

    #[error(
        "Selected parent fields contain non-numeric values, which are not valid for {function}(): {}",
        .parents.join(", ")
    )]
    Type {
        function: &'static str,
        /// Labels of the offending parents.
        parents: Vec<String>,
    },

    #[error("{function}() requires a date parent field, but '{parent}' is not a date.")]
    NotDateLike {
        function: &'static str,
        parent: String,
    },

    #[error("Formula would create a {0}")]
    Cycle(CycleError),
}

/// Editor state for a field's derivation: the toggle, the parent selection and formula text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedFieldDraft {
    pub is_derived: bool,
    pub parents: Vec<FieldId>,
    pub formula: String,
}

impl DerivedFieldDraft {
    /// Seed the editor from a field's stored config.
    pub fn from_config(config: Option<&DerivedFieldConfig>) -> Self {
        match config {
            Some(config) => Self {
                is_derived: true,
                parents: config.parents.clone(),
                formula: config.formula.clone(),
            },
            None => Self::default(),
        }
    }
}

/// Result of committing a draft, for display next to the formula editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftOutcome {
    pub config: Option<DerivedFieldConfig>,
    pub error: Option<String>,
}

/// Fields that may be offered as parents of `current`: every field except itself.
pub fn selectable_parents<'a>(current: &FieldId, fields: &'a [Field]) -> Vec<&'a Field> {
    fields.iter().filter(|f| &f.id != current).collect()
}

/// Validate a candidate config for the field `current`.
///
/// Checks run in order and stop at the first failure: parent selection, self reference,
/// unknown parents, syntax, function lookup, arity, parent types, then cycles.
pub fn validate_derived(
    formula: &str,
    parents: &[FieldId],
    current: &FieldId,
    fields: &[Field],
    opts: &ValidationOptions,
) -> Result<DerivedFieldConfig, DerivedFieldError> {
    let result = check_derived(formula, parents, current, fields, opts);
    if let Err(err) = &result {
        log::debug!("rejected derived config for {current}: {err}");
    }
    result
}

fn check_derived(
    formula: &str,
    parents: &[FieldId],
    current: &FieldId,
    fields: &[Field],
    opts: &ValidationOptions,
) -> Result<DerivedFieldConfig, DerivedFieldError> {
    if parents.is_empty() {
        return Err(DerivedFieldError::EmptySelection);
    }

    if parents.contains(current) {
        return Err(DerivedFieldError::SelfReference {
            field: current.clone(),
        });
    }

    let mut parent_fields = Vec::with_capacity(parents.len());
    for id in parents {
        let field = fields
            .iter()
            .find(|f| &f.id == id)
            .ok_or_else(|| DerivedFieldError::UnknownParent { parent: id.clone() })?;
        parent_fields.push(field);
    }

    let call = parse_formula(formula)?;

    let spec = lookup_function(&call.function_name).ok_or_else(|| {
        DerivedFieldError::UnsupportedFunction {
            name: call.identifier.clone(),
            supported: supported_function_names(),
        }
    })?;

    if !spec.arity.accepts(parents.len()) {
        return Err(DerivedFieldError::Arity {
            function: spec.name,
            actual: parents.len(),
        });
    }

    match spec.parent_type {
        ParentType::NumericCoercible => {
            let offending: Vec<String> = parent_fields
                .iter()
                .filter(|f| !is_numeric_field(f))
                .map(|f| f.label.clone())
                .collect();
            if !offending.is_empty() {
                return Err(DerivedFieldError::Type {
                    function: spec.name,
                    parents: offending,
                });
            }
        }
        ParentType::DateLike if opts.strict_age_parent => {
            if let Some(parent) = parent_fields.iter().find(|f| !is_date_like_field(f)) {
                return Err(DerivedFieldError::NotDateLike {
                    function: spec.name,
                    parent: parent.label.clone(),
                });
            }
        }
        ParentType::DateLike | ParentType::Any => {}
    }

    if opts.reject_cycles {
        let graph = ParentGraph::from_fields(fields);
        if let Some(cycle) = graph.cycle_with(current, parents) {
            return Err(DerivedFieldError::Cycle(cycle));
        }
    }

    Ok(DerivedFieldConfig::new(parents.to_vec(), formula))
}

fn is_date_like_field(field: &Field) -> bool {
    field.field_type == FieldType::Date
        || field
            .default_value
            .as_ref()
            .and_then(coerce_text)
            .and_then(parse_date_like)
            .is_some()
}

/// Validate the editor state. A draft with the toggle off is "not derived": `Ok(None)`.
pub fn validate_draft(
    draft: &DerivedFieldDraft,
    current: &FieldId,
    fields: &[Field],
    opts: &ValidationOptions,
) -> Result<Option<DerivedFieldConfig>, DerivedFieldError> {
    if !draft.is_derived {
        return Ok(None);
    }
    validate_derived(&draft.formula, &draft.parents, current, fields, opts).map(Some)
}

/// Validate a draft and store the result on the field.
///
/// A rejected or toggled-off draft clears any previously confirmed config, turning the field
/// back into a plain input.
pub fn commit_draft(
    fields: &mut FormFields,
    current: &FieldId,
    draft: &DerivedFieldDraft,
    opts: &ValidationOptions,
) -> DraftOutcome {
    let outcome = match validate_draft(draft, current, fields.fields(), opts) {
        Ok(config) => DraftOutcome {
            config,
            error: None,
        },
        Err(err) => DraftOutcome {
            config: None,
            error: Some(err.to_string()),
        },
    };

    if let Some(field) = fields.field_mut(current) {
        field.derived = outcome.config.clone();
    }
    outcome
}
