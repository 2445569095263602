use formbuilder_model::FieldValue;

use crate::coercion::coerce_text;
use crate::date::{age_in_years, parse_date_like};
use crate::functions::{Arity, FunctionContext, FunctionSpec, ParentType};

inventory::submit! {
    FunctionSpec {
        name: "calculateAge",
        aliases: &[],
        arity: Arity::ExactlyOne,
        parent_type: ParentType::DateLike,
        implementation: calculate_age_fn,
    }
}

fn calculate_age_fn(ctx: &dyn FunctionContext) -> FieldValue {
    let age = ctx
        .sole_parent_value()
        .and_then(coerce_text)
        .and_then(parse_date_like)
        .and_then(|born| age_in_years(born, ctx.now_utc()));

    match age {
        Some(years) => FieldValue::Number(f64::from(years)),
        None => FieldValue::empty(),
    }
}
