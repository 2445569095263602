use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use formbuilder_model::{FieldId, FieldValue};

use crate::coercion::coerce_number;

// Built-in functions registered with the inventory-backed registry live in dedicated modules.
mod builtins_date_time;
mod builtins_math;
mod builtins_text;

/// How many parent fields a function reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    ExactlyOne,
    AtLeastOne,
    /// Any number of parents; the argument text may pick parents and a separator.
    VariadicWithSeparator,
}

impl Arity {
    pub fn accepts(self, parents: usize) -> bool {
        match self {
            Arity::ExactlyOne => parents == 1,
            Arity::AtLeastOne | Arity::VariadicWithSeparator => parents >= 1,
        }
    }
}

/// What a function requires of its parent fields at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentType {
    Any,
    /// Every parent must be a `number` field or hold a numeric value.
    NumericCoercible,
    /// The parent is read as a date string. Only enforced under strict validation.
    DateLike,
}

/// Everything a built-in may read while evaluating one derived field.
pub trait FunctionContext {
    /// Parent ids from the derived config, in order.
    fn parents(&self) -> &[FieldId];
    /// Current value of a field in the snapshot; `None` when absent or unknown.
    fn value_of(&self, id: &FieldId) -> Option<&FieldValue>;
    /// Comma-split argument text of the call.
    fn args(&self) -> &[String];
    fn now_utc(&self) -> DateTime<Utc>;

    fn parent_values(&self) -> Vec<Option<&FieldValue>> {
        self.parents().iter().map(|id| self.value_of(id)).collect()
    }

    /// The single parent's value for exactly-one functions.
    ///
    /// Returns `None` when the call does not have exactly one parent or the value is absent.
    fn sole_parent_value(&self) -> Option<&FieldValue> {
        match self.parents() {
            [only] => self.value_of(only),
            _ => None,
        }
    }
}

pub type FunctionImpl = fn(&dyn FunctionContext) -> FieldValue;

#[derive(Clone, Copy)]
pub struct FunctionSpec {
    /// Canonical name shown to users (e.g. `calculateAge`).
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub parent_type: ParentType,
    pub implementation: FunctionImpl,
}

impl std::fmt::Debug for FunctionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("arity", &self.arity)
            .field("parent_type", &self.parent_type)
            .finish_non_exhaustive()
    }
}

inventory::collect!(FunctionSpec);

/// Iterate all [`FunctionSpec`] registrations collected via [`inventory`].
pub fn iter_function_specs() -> impl Iterator<Item = &'static FunctionSpec> {
    inventory::iter::<FunctionSpec>.into_iter()
}

fn registry() -> &'static HashMap<String, &'static FunctionSpec> {
    static REGISTRY: OnceLock<HashMap<String, &'static FunctionSpec>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        for spec in inventory::iter::<FunctionSpec> {
            map.insert(spec.name.to_lowercase(), spec);
            for alias in spec.aliases {
                map.insert(alias.to_lowercase(), spec);
            }
        }
        map
    })
}

/// Case-insensitive lookup by canonical name or alias.
pub fn lookup_function(name: &str) -> Option<&'static FunctionSpec> {
    registry().get(&name.to_lowercase()).copied()
}

/// Canonical names of every registered function, sorted case-insensitively.
pub fn supported_function_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = iter_function_specs().map(|spec| spec.name).collect();
    names.sort_by_key(|name| name.to_lowercase());
    names
}

/// Dispatch to a built-in. Unknown names evaluate to the empty value.
pub fn call_function(ctx: &dyn FunctionContext, name: &str) -> FieldValue {
    match lookup_function(name) {
        Some(spec) => (spec.implementation)(ctx),
        None => FieldValue::empty(),
    }
}

/// Numeric parent values in parent order, skipping absent and non-numeric ones.
pub(crate) fn numeric_parent_values(ctx: &dyn FunctionContext) -> Vec<f64> {
    ctx.parent_values()
        .into_iter()
        .flatten()
        .filter_map(coerce_number)
        .collect()
}
