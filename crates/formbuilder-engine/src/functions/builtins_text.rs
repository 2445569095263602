use formbuilder_model::{FieldId, FieldValue};

use crate::coercion::{coerce_text, to_display_text};
use crate::functions::{Arity, FunctionContext, FunctionSpec, ParentType};

inventory::submit! {
    FunctionSpec {
        name: "concat",
        aliases: &[],
        arity: Arity::VariadicWithSeparator,
        parent_type: ParentType::Any,
        implementation: concat_fn,
    }
}

/// `concat()` joins every parent with no separator.
///
/// When the call has more arguments than there are parents, the last argument is the separator
/// (optionally quoted, so `" "` joins with a space) and the leading arguments name the parent
/// ids to join, in that order. Empty values are skipped before joining.
fn concat_fn(ctx: &dyn FunctionContext) -> FieldValue {
    let parents = ctx.parents();
    let args = ctx.args();

    let (selected, separator): (Vec<&FieldId>, &str) = match args.split_last() {
        Some((separator, selectors)) if args.len() > parents.len() => {
            let selected = selectors
                .iter()
                .filter_map(|selector| {
                    parents
                        .iter()
                        .find(|id| id.as_str() == selector.as_str())
                })
                .collect();
            (selected, unquote(separator))
        }
        _ => (parents.iter().collect(), ""),
    };

    let parts: Vec<String> = selected
        .into_iter()
        .filter_map(|id| ctx.value_of(id))
        .map(to_display_text)
        .filter(|s| !s.is_empty())
        .collect();

    FieldValue::Text(parts.join(separator))
}

fn unquote(arg: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = arg
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    arg
}

inventory::submit! {
    FunctionSpec {
        name: "uppercase",
        aliases: &[],
        arity: Arity::ExactlyOne,
        parent_type: ParentType::Any,
        implementation: uppercase_fn,
    }
}

fn uppercase_fn(ctx: &dyn FunctionContext) -> FieldValue {
    case_fold(ctx, str::to_uppercase)
}

inventory::submit! {
    FunctionSpec {
        name: "lowercase",
        aliases: &[],
        arity: Arity::ExactlyOne,
        parent_type: ParentType::Any,
        implementation: lowercase_fn,
    }
}

fn lowercase_fn(ctx: &dyn FunctionContext) -> FieldValue {
    case_fold(ctx, str::to_lowercase)
}

fn case_fold(ctx: &dyn FunctionContext, fold: fn(&str) -> String) -> FieldValue {
    ctx.sole_parent_value()
        .and_then(coerce_text)
        .map(|text| FieldValue::Text(fold(text)))
        .unwrap_or_else(FieldValue::empty)
}
