use formbuilder_engine::functions::{
    iter_function_specs, lookup_function, supported_function_names, Arity, ParentType,
};
use pretty_assertions::assert_eq;

#[test]
fn lookup_is_case_insensitive() {
    for name in ["sum", "SUM", "Sum", "calculateage", "CALCULATEAGE", "calculateAge"] {
        assert!(lookup_function(name).is_some(), "{name}");
    }
    assert_eq!(lookup_function("CalculateAge").unwrap().name, "calculateAge");
    assert!(lookup_function("median").is_none());
    assert!(lookup_function("").is_none());
}

#[test]
fn aliases_resolve_to_the_canonical_spec() {
    let avg = lookup_function("AVG").unwrap();
    assert_eq!(avg.name, "average");
    assert_eq!(avg.arity, Arity::AtLeastOne);
}

#[test]
fn supported_names_are_sorted_and_unique() {
    assert_eq!(
        supported_function_names(),
        vec![
            "average",
            "calculateAge",
            "concat",
            "lowercase",
            "max",
            "min",
            "round",
            "sum",
            "uppercase",
        ]
    );
    assert_eq!(iter_function_specs().count(), 9);
}

#[test]
fn registry_describes_parent_requirements() {
    let expect = [
        ("sum", Arity::AtLeastOne, ParentType::NumericCoercible),
        ("round", Arity::ExactlyOne, ParentType::NumericCoercible),
        ("calculateAge", Arity::ExactlyOne, ParentType::DateLike),
        ("concat", Arity::VariadicWithSeparator, ParentType::Any),
        ("uppercase", Arity::ExactlyOne, ParentType::Any),
    ];
    for (name, arity, parent_type) in expect {
        let spec = lookup_function(name).unwrap();
        assert_eq!(spec.arity, arity, "{name}");
        assert_eq!(spec.parent_type, parent_type, "{name}");
    }
}
