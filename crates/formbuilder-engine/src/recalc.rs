use formbuilder_model::{Field, FieldId, FieldValue};
use thiserror::Error;

use crate::eval::Evaluator;
use crate::graph::{CycleError, ParentGraph};
use crate::settings::RecalcSettings;
use crate::snapshot::ValueSnapshot;

/// A derived value that was overwritten during recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub field: FieldId,
    pub old: Option<FieldValue>,
    pub new: FieldValue,
    /// 1-based pass that produced the change.
    pub pass: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecalcReport {
    pub fields: Vec<Field>,
    pub changes: Vec<ValueChange>,
    /// Passes run, including the final pass that changed nothing.
    pub passes: u32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecalcError {
    #[error("derived fields did not settle after {passes} recompute passes")]
    DidNotConverge {
        passes: u32,
        /// Field values as left by the last pass.
        fields: Vec<Field>,
        changes: Vec<ValueChange>,
        /// A parent cycle in the form, when one exists.
        cycle: Option<CycleError>,
    },
}

/// Run one pass: evaluate every derived field against a single snapshot taken before the pass
/// and overwrite the values that differ.
pub fn recompute_pass(fields: &mut [Field], evaluator: &Evaluator, pass: u32) -> Vec<ValueChange> {
    let snapshot = ValueSnapshot::capture(fields.iter());
    let mut changes = Vec::new();

    for field in fields.iter_mut() {
        let Some(derived) = &field.derived else {
            continue;
        };
        let new = evaluator.evaluate(&derived.formula, &derived.parents, &snapshot);
        if field.default_value.as_ref() == Some(&new) {
            continue;
        }
        let old = field.default_value.replace(new.clone());
        changes.push(ValueChange {
            field: field.id.clone(),
            old,
            new,
            pass,
        });
    }

    changes
}

/// Recompute derived fields until a pass changes nothing.
///
/// Fails with [`RecalcError::DidNotConverge`] once the pass limit is reached with every pass
/// still producing changes. The limit is `settings.max_passes`, raised to the number of derived
/// fields plus one when the parent graph has no cycle, so acyclic forms always settle.
pub fn recompute(
    fields: Vec<Field>,
    evaluator: &Evaluator,
    settings: &RecalcSettings,
) -> Result<RecalcReport, RecalcError> {
    let mut fields = fields;
    let mut changes = Vec::new();
    let cycle = ParentGraph::from_fields(&fields).find_cycle();
    let limit = pass_limit(&fields, cycle.is_some(), settings);

    for pass in 1..=limit {
        let pass_changes = recompute_pass(&mut fields, evaluator, pass);
        log::debug!("recompute pass {pass}: {} value(s) changed", pass_changes.len());
        if pass_changes.is_empty() {
            return Ok(RecalcReport {
                fields,
                changes,
                passes: pass,
            });
        }
        changes.extend(pass_changes);
    }

    match &cycle {
        Some(cycle) => log::warn!("derived fields did not settle after {limit} passes; {cycle}"),
        None => log::warn!("derived fields did not settle after {limit} passes"),
    }
    Err(RecalcError::DidNotConverge {
        passes: limit,
        fields,
        changes,
        cycle,
    })
}

fn pass_limit(fields: &[Field], has_cycle: bool, settings: &RecalcSettings) -> u32 {
    let cap = settings.max_passes.max(1);
    if has_cycle {
        return cap;
    }
    // Each pass settles at least one more level of an acyclic chain.
    let derived = fields.iter().filter(|f| f.is_derived()).count();
    let needed = u32::try_from(derived).unwrap_or(u32::MAX).saturating_add(1);
    cap.max(needed)
}
