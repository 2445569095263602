use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use formbuilder_model::{FieldId, FieldValue};

use crate::functions::{call_function, FunctionContext};
use crate::parser::parse_formula;
use crate::snapshot::ValueSnapshot;

/// Source of "now" for date functions.
///
/// Evaluation reads no global state; hosts inject the clock so results are reproducible.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Evaluates derived-field formulas against a [`ValueSnapshot`].
#[derive(Clone)]
pub struct Evaluator {
    clock: Arc<dyn Clock>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator").finish_non_exhaustive()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    pub fn now_utc(&self) -> DateTime<Utc> {
        self.clock.now_utc()
    }

    /// Compute a derived value.
    ///
    /// Never fails: malformed formulas, unknown functions and unusable parent values all
    /// produce the empty text value.
    pub fn evaluate(
        &self,
        formula: &str,
        parents: &[FieldId],
        snapshot: &ValueSnapshot,
    ) -> FieldValue {
        let Ok(call) = parse_formula(formula) else {
            log::trace!("formula {formula:?} does not parse; evaluating to empty");
            return FieldValue::empty();
        };

        let ctx = CallContext {
            parents,
            snapshot,
            args: call.args(),
            now: self.clock.now_utc(),
        };
        let value = call_function(&ctx, &call.function_name);
        log::trace!("{formula} over {parents:?} = {value:?}");
        value
    }
}

/// Evaluate with the system clock.
pub fn evaluate_formula(formula: &str, parents: &[FieldId], snapshot: &ValueSnapshot) -> FieldValue {
    Evaluator::new().evaluate(formula, parents, snapshot)
}

struct CallContext<'a> {
    parents: &'a [FieldId],
    snapshot: &'a ValueSnapshot,
    args: Vec<String>,
    now: DateTime<Utc>,
}

impl FunctionContext for CallContext<'_> {
    fn parents(&self) -> &[FieldId] {
        self.parents
    }

    fn value_of(&self, id: &FieldId) -> Option<&FieldValue> {
        self.snapshot.get(id)
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}
