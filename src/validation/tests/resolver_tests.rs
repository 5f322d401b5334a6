//! Unit tests for message resolution.

use super::fixtures::{english_resolver, text, validator};
use crate::validation::{
    adapters::memory::InMemoryTemplateStore,
    domain::{
        ConstraintRule, FieldPath, FieldValue, Locale, MessageKey, ValidationFailure,
        ValidationMode, ValidationOutcome,
    },
    error::RenderError,
    ports::TemplateStore,
    services::{FieldValidator, MessageResolver, RenderedMessage, ResolverConfig},
};
use mockall::{mock, predicate::eq};
use rstest::rstest;
use std::sync::Arc;

mock! {
    Templates {}

    impl TemplateStore for Templates {
        fn lookup_template(&self, key: &MessageKey, locale: &Locale) -> Option<String>;
    }
}

fn failure_for(rule: &ConstraintRule, value: &FieldValue) -> ValidationFailure {
    ValidationFailure::new(FieldPath::new("person", "firstName"), rule, value)
}

fn english() -> Locale {
    Locale::new("en")
}

#[rstest]
#[case::too_short("B", "must be at least 2 characters")]
#[case::too_long("Bartholomew", "can't be more than 10 characters")]
fn reference_scenarios_render_in_english(
    validator: FieldValidator,
    english_resolver: MessageResolver<InMemoryTemplateStore>,
    #[case] input: &str,
    #[case] expected: &str,
) {
    let outcome = validator
        .validate("person", "firstName", &text(input), ValidationMode::FailFast)
        .expect("registered field");

    let rendered = english_resolver.render(&outcome, &english()).expect("render");

    assert_eq!(rendered, RenderedMessage::Single(expected.to_owned()));
}

#[rstest]
fn valid_outcome_renders_nothing_without_consulting_the_store() {
    let mut store = MockTemplates::new();
    store.expect_lookup_template().never();
    let resolver = MessageResolver::with_config(Arc::new(store), ResolverConfig::strict());

    let rendered = resolver
        .render(&ValidationOutcome::Valid, &Locale::new("xx"))
        .expect("valid outcomes never fail");

    assert!(rendered.is_none());
}

#[rstest]
fn accumulated_failures_render_in_order(
    validator: FieldValidator,
    english_resolver: MessageResolver<InMemoryTemplateStore>,
) {
    let outcome = validator
        .validate("person", "postcode", &text("12a"), ValidationMode::Accumulate)
        .expect("registered field");

    let rendered = english_resolver.render(&outcome, &english()).expect("render");

    assert_eq!(
        rendered.into_vec(),
        vec![
            "must be at least 5 characters".to_owned(),
            "is not in the expected format".to_owned(),
        ]
    );
}

#[rstest]
fn regional_locale_falls_back_to_base_language(
    english_resolver: MessageResolver<InMemoryTemplateStore>,
) {
    let failure = failure_for(&ConstraintRule::min_length(2), &text("B"));

    let message = english_resolver
        .render_failure(&failure, &Locale::new("en_GB"))
        .expect("render");

    assert_eq!(message, "must be at least 2 characters");
}

#[rstest]
fn unknown_locale_falls_back_to_default_locale(
    english_resolver: MessageResolver<InMemoryTemplateStore>,
) {
    let failure = failure_for(&ConstraintRule::max_length(10), &text("Bartholomew"));

    let message = english_resolver
        .render_failure(&failure, &Locale::new("de"))
        .expect("render");

    assert_eq!(message, "can't be more than 10 characters");
}

#[rstest]
fn missing_key_renders_the_key_verbatim(
    english_resolver: MessageResolver<InMemoryTemplateStore>,
) {
    let rule = ConstraintRule::min_length(2).with_message_key("person.first_name.too_short");
    let failure = failure_for(&rule, &text("B"));

    let message = english_resolver
        .render_failure(&failure, &english())
        .expect("fallback never fails");

    assert_eq!(message, "person.first_name.too_short");
}

#[rstest]
fn strict_policy_reports_missing_template() {
    let store = InMemoryTemplateStore::english_defaults();
    let resolver = MessageResolver::with_config(Arc::new(store), ResolverConfig::strict());
    let failure = failure_for(&ConstraintRule::min_length(2), &text("B"));

    let result = resolver.render_failure(&failure, &Locale::new("fr"));

    assert_eq!(
        result,
        Err(RenderError::MissingTemplate {
            key: MessageKey::new("validation.min_length"),
            locale: Locale::new("fr"),
        })
    );
}

#[rstest]
fn fallback_consults_requested_locale_before_default() {
    let key = MessageKey::new("validation.min_length");
    let mut store = MockTemplates::new();
    let mut sequence = mockall::Sequence::new();
    store
        .expect_lookup_template()
        .with(eq(key.clone()), eq(Locale::new("fr-ca")))
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(None::<String>);
    store
        .expect_lookup_template()
        .with(eq(key.clone()), eq(Locale::new("fr")))
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(None::<String>);
    store
        .expect_lookup_template()
        .with(eq(key), eq(Locale::new("en")))
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(Some("at least {0}".to_owned()));
    let resolver = MessageResolver::new(Arc::new(store));
    let failure = failure_for(&ConstraintRule::min_length(2), &text("B"));

    let message = resolver
        .render_failure(&failure, &Locale::new("fr-CA"))
        .expect("render");

    assert_eq!(message, "at least 2");
}

#[rstest]
fn named_placeholders_reach_the_template() {
    let store = InMemoryTemplateStore::new()
        .with_template("en", "validation.range", "{field} must be between {lo} and {hi}, got {value}");
    let resolver = MessageResolver::new(Arc::new(store));
    let rule = ConstraintRule::range(0, 150).expect("valid range");
    let failure = ValidationFailure::new(FieldPath::new("person", "age"), &rule, &FieldValue::Integer(200));

    let message = resolver.render_failure(&failure, &english()).expect("render");

    assert_eq!(message, "age must be between 0 and 150, got 200");
}

#[rstest]
fn template_expressions_are_supported() {
    let store = InMemoryTemplateStore::new().with_template(
        "en",
        "validation.min_length",
        "needs {{ min - value|length }} more character{% if min - value|length > 1 %}s{% endif %}",
    );
    let resolver = MessageResolver::new(Arc::new(store));
    let failure = failure_for(&ConstraintRule::min_length(4), &text("B"));

    let message = resolver.render_failure(&failure, &english()).expect("render");

    assert_eq!(message, "needs 3 more characters");
}

#[rstest]
fn malformed_template_reports_render_error() {
    let store = InMemoryTemplateStore::new().with_template("en", "validation.min_length", "{% if %}");
    let resolver = MessageResolver::new(Arc::new(store));
    let failure = failure_for(&ConstraintRule::min_length(2), &text("B"));

    let result = resolver.render_failure(&failure, &english());

    assert!(matches!(result, Err(RenderError::TemplateRender { .. })));
}

#[rstest]
#[case::index_past_the_end("au moins {1} caractères")]
#[case::misspelled_name("{vlaue} est trop court")]
fn unresolved_placeholders_report_render_error(#[case] template: &str) {
    let store = InMemoryTemplateStore::new().with_template("fr", "validation.min_length", template);
    let resolver = MessageResolver::new(Arc::new(store));
    let failure = failure_for(&ConstraintRule::min_length(2), &text("B"));

    let result = resolver.render_failure(&failure, &Locale::new("fr"));

    assert!(matches!(
        result,
        Err(RenderError::TemplateRender { key, .. }) if key.as_str() == "validation.min_length"
    ));
}

#[rstest]
fn custom_default_locale_is_used_for_fallback() {
    let store = InMemoryTemplateStore::new().with_template(
        "fr",
        "validation.min_length",
        "doit contenir au moins {0} caractères",
    );
    let config = ResolverConfig::default().with_default_locale("fr");
    let resolver = MessageResolver::with_config(Arc::new(store), config);
    let failure = failure_for(&ConstraintRule::min_length(2), &text("B"));

    let message = resolver.render_failure(&failure, &english()).expect("render");

    assert_eq!(message, "doit contenir au moins 2 caractères");
}
