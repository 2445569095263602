use formbuilder_model::FieldValue;

use crate::coercion::{coerce_number, format_number};
use crate::functions::{numeric_parent_values, Arity, FunctionContext, FunctionSpec, ParentType};

inventory::submit! {
    FunctionSpec {
        name: "sum",
        aliases: &[],
        arity: Arity::AtLeastOne,
        parent_type: ParentType::NumericCoercible,
        implementation: sum_fn,
    }
}

fn sum_fn(ctx: &dyn FunctionContext) -> FieldValue {
    let total: f64 = numeric_parent_values(ctx).into_iter().sum();
    FieldValue::Text(format_number(total))
}

inventory::submit! {
    FunctionSpec {
        name: "average",
        aliases: &["avg"],
        arity: Arity::AtLeastOne,
        parent_type: ParentType::NumericCoercible,
        implementation: average_fn,
    }
}

fn average_fn(ctx: &dyn FunctionContext) -> FieldValue {
    let values = numeric_parent_values(ctx);
    if values.is_empty() {
        return FieldValue::empty();
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    FieldValue::Text(format_number(mean))
}

inventory::submit! {
    FunctionSpec {
        name: "max",
        aliases: &[],
        arity: Arity::AtLeastOne,
        parent_type: ParentType::NumericCoercible,
        implementation: max_fn,
    }
}

fn max_fn(ctx: &dyn FunctionContext) -> FieldValue {
    extremum(ctx, f64::max)
}

inventory::submit! {
    FunctionSpec {
        name: "min",
        aliases: &[],
        arity: Arity::AtLeastOne,
        parent_type: ParentType::NumericCoercible,
        implementation: min_fn,
    }
}

fn min_fn(ctx: &dyn FunctionContext) -> FieldValue {
    extremum(ctx, f64::min)
}

fn extremum(ctx: &dyn FunctionContext, pick: fn(f64, f64) -> f64) -> FieldValue {
    numeric_parent_values(ctx)
        .into_iter()
        .reduce(pick)
        .map(|n| FieldValue::Text(format_number(n)))
        .unwrap_or_else(FieldValue::empty)
}

inventory::submit! {
    FunctionSpec {
        name: "round",
        aliases: &[],
        arity: Arity::ExactlyOne,
        parent_type: ParentType::NumericCoercible,
        implementation: round_fn,
    }
}

/// Rounds half away from zero (`2.5 -> 3`, `-2.5 -> -3`).
fn round_fn(ctx: &dyn FunctionContext) -> FieldValue {
    ctx.sole_parent_value()
        .and_then(coerce_number)
        .map(|n| FieldValue::Text(format_number(n.round())))
        .unwrap_or_else(FieldValue::empty)
}
