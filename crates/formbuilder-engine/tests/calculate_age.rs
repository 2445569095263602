use chrono::{TimeZone, Utc};
use formbuilder_engine::{Evaluator, FixedClock, ValueSnapshot};
use formbuilder_model::{FieldId, FieldValue};
use pretty_assertions::assert_eq;

fn evaluator() -> Evaluator {
    Evaluator::with_clock(FixedClock(
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
    ))
}

fn age_of(value: FieldValue) -> FieldValue {
    let snap: ValueSnapshot = [(FieldId::from("dob"), value)].into_iter().collect();
    evaluator().evaluate("calculateAge()", &[FieldId::from("dob")], &snap)
}

#[test]
fn counts_whole_years_since_birth() {
    assert_eq!(age_of(FieldValue::from("2000-01-01")), FieldValue::Number(26.0));
    assert_eq!(age_of(FieldValue::from("1990-03-01")), FieldValue::Number(36.0));
    assert_eq!(
        age_of(FieldValue::from("2026-01-01T00:00:00Z")),
        FieldValue::Number(0.0)
    );
}

#[test]
fn future_dates_count_year_boundaries_before_the_epoch() {
    assert_eq!(age_of(FieldValue::from("2030-01-01")), FieldValue::Number(4.0));
}

#[test]
fn non_dates_are_not_computable() {
    assert_eq!(age_of(FieldValue::from("not-a-date")), FieldValue::empty());
    assert_eq!(age_of(FieldValue::from("")), FieldValue::empty());
    assert_eq!(age_of(FieldValue::Number(2000.0)), FieldValue::empty());
}

#[test]
fn requires_exactly_one_parent() {
    let snap: ValueSnapshot = [
        (FieldId::from("a"), FieldValue::from("2000-01-01")),
        (FieldId::from("b"), FieldValue::from("2001-01-01")),
    ]
    .into_iter()
    .collect();
    let parents = [FieldId::from("a"), FieldId::from("b")];
    assert_eq!(
        evaluator().evaluate("calculateAge()", &parents, &snap),
        FieldValue::empty()
    );
    assert_eq!(
        evaluator().evaluate("calculateAge()", &[FieldId::from("missing")], &snap),
        FieldValue::empty()
    );
}

#[test]
fn system_clock_age_is_non_negative_integer() {
    let snap: ValueSnapshot = [(FieldId::from("dob"), FieldValue::from("2000-01-01"))]
        .into_iter()
        .collect();
    let age = Evaluator::new()
        .evaluate("calculateAge()", &[FieldId::from("dob")], &snap)
        .as_number()
        .unwrap();
    assert!(age >= 0.0);
    assert_eq!(age.fract(), 0.0);
}
