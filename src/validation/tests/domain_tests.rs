//! Unit tests for domain value types.

use crate::validation::domain::{
    ConstraintRule, FieldPath, FieldValue, Locale, Number, RuleParam, ValidationFailure,
    ValidationMode, ValidationOutcome,
};
use rstest::rstest;
use std::cmp::Ordering;

#[rstest]
#[case::plain("en", "en", None)]
#[case::regional("en-GB", "en-gb", Some("en"))]
#[case::underscore(" pt_BR ", "pt-br", Some("pt"))]
fn locales_are_normalized(
    #[case] raw: &str,
    #[case] normalized: &str,
    #[case] base: Option<&str>,
) {
    let locale = Locale::new(raw);

    assert_eq!(locale.as_str(), normalized);
    assert_eq!(locale.base_language().map(String::from).as_deref(), base);
}

#[rstest]
#[case::integers(Number::Integer(2), Number::Integer(3), Some(Ordering::Less))]
#[case::mixed(Number::Integer(2), Number::Float(2.0), Some(Ordering::Equal))]
#[case::float_first(Number::Float(2.5), Number::Integer(2), Some(Ordering::Greater))]
#[case::nan(Number::Float(f64::NAN), Number::Integer(0), None)]
fn numbers_compare_across_representations(
    #[case] left: Number,
    #[case] right: Number,
    #[case] expected: Option<Ordering>,
) {
    assert_eq!(left.compare(right), expected);
}

#[rstest]
#[case::text(FieldValue::from("héllo"), Some(5))]
#[case::list(FieldValue::from(vec!["a", "b"]), Some(2))]
#[case::integer(FieldValue::Integer(12), None)]
#[case::null(FieldValue::Null, None)]
fn only_text_and_lists_have_length(#[case] value: FieldValue, #[case] expected: Option<usize>) {
    assert_eq!(value.length(), expected);
}

#[rstest]
fn field_values_deserialize_from_plain_json() {
    let values: Vec<FieldValue> =
        serde_json::from_str(r#"[null, true, 3, 3.5, "x", [1]]"#).expect("deserialize");

    assert_eq!(
        values,
        vec![
            FieldValue::Null,
            FieldValue::Boolean(true),
            FieldValue::Integer(3),
            FieldValue::Float(3.5),
            FieldValue::from("x"),
            FieldValue::List(vec![FieldValue::Integer(1)]),
        ]
    );
}

#[rstest]
fn range_substitution_values_keep_bound_types() {
    let rule = ConstraintRule::range(1, 2.5).expect("valid range");

    assert_eq!(
        rule.substitution_values(),
        vec![RuleParam::Integer(1), RuleParam::Float(2.5)]
    );
}

#[rstest]
fn declared_substitution_values_replace_derived_ones() {
    let rule = ConstraintRule::pattern("^[0-9]+$")
        .expect("valid pattern")
        .with_substitution_values([RuleParam::from("digits only")]);

    assert_eq!(rule.substitution_values(), vec![RuleParam::from("digits only")]);
    assert_eq!(rule.parameters(), vec![RuleParam::from("^[0-9]+$")]);

    let failure = ValidationFailure::new(
        FieldPath::new("person", "postcode"),
        &rule,
        &FieldValue::from("12a"),
    );
    assert_eq!(failure.substitution_values, vec![RuleParam::from("digits only")]);
}

#[rstest]
fn range_allows_equal_bounds() {
    assert!(ConstraintRule::range(3, 3).is_ok());
}

#[rstest]
fn field_path_displays_as_dotted_name() {
    assert_eq!(FieldPath::new("person", "firstName").to_string(), "person.firstName");
}

#[rstest]
fn default_mode_is_fail_fast() {
    assert_eq!(ValidationMode::default(), ValidationMode::FailFast);
}

#[rstest]
fn valid_outcome_has_no_failures() {
    assert!(ValidationOutcome::Valid.failures().is_empty());
    assert!(ValidationOutcome::Valid.is_valid());
}
