//! End-to-end tests: declarative table to rendered messages.

use std::sync::Arc;
use std::thread;

use fieldrules::validation::{
    adapters::memory::InMemoryTemplateStore,
    config::ValidationTable,
    domain::{FieldValue, Locale, RuleKind, ValidationMode, ValidationOutcome},
    predicates::PredicateRegistry,
    services::{FieldValidator, MessageResolver, RenderedMessage},
};

const SIGNUP_TABLE: &str = r#"{
    "fields": [
        {
            "entity": "account",
            "field": "username",
            "rules": [
                { "kind": "min_length", "parameters": [3] },
                { "kind": "max_length", "parameters": [16] },
                { "kind": "pattern", "parameters": ["^[a-z0-9_]+$"], "message_key": "account.username.charset" }
            ]
        },
        {
            "entity": "account",
            "field": "age",
            "rules": [ { "kind": "range", "parameters": [13, 120] } ]
        },
        {
            "entity": "account",
            "field": "displayName",
            "rules": [ { "kind": "custom", "parameters": ["non_blank"], "message_key": "account.display_name.blank" } ]
        }
    ]
}"#;

const CATALOG: &str = r#"{
    "en": {
        "account.username.charset": "may only contain lowercase letters, digits and underscores",
        "account.display_name.blank": "must not be blank"
    },
    "fr": {
        "validation.min_length": "doit contenir au moins {0} caractères",
        "validation.range": "doit être compris entre {lo} et {hi}"
    }
}"#;

fn signup_validator() -> FieldValidator {
    let registry = ValidationTable::from_json_str(SIGNUP_TABLE)
        .and_then(ValidationTable::into_registry)
        .expect("signup table should load");
    FieldValidator::new(Arc::new(registry), Arc::new(PredicateRegistry::with_builtins()))
}

fn resolver() -> MessageResolver<InMemoryTemplateStore> {
    let catalog = InMemoryTemplateStore::from_json(CATALOG).expect("catalog should load");
    MessageResolver::new(Arc::new(
        InMemoryTemplateStore::english_defaults().merged(catalog),
    ))
}

// ============================================================================
// Scenario: A valid signup passes every field
// ============================================================================

#[test]
fn valid_signup_passes_every_field() {
    let validator = signup_validator();
    let username = FieldValue::from("ada_lovelace");
    let age = FieldValue::Integer(36);
    let display_name = FieldValue::from("Ada");

    let outcomes = validator
        .validate_record(
            "account",
            [
                ("username", &username),
                ("age", &age),
                ("displayName", &display_name),
            ],
            ValidationMode::Accumulate,
        )
        .expect("all fields are registered");

    assert!(outcomes.iter().all(|(_, outcome)| outcome.is_valid()));
}

// ============================================================================
// Scenario: Accumulated failures render in evaluation order
// ============================================================================

#[test]
fn accumulated_username_failures_render_in_order() {
    let validator = signup_validator();

    let outcome = validator
        .validate("account", "username", &FieldValue::from("A!"), ValidationMode::Accumulate)
        .expect("registered field");
    let messages = resolver()
        .render(&outcome, &Locale::new("en"))
        .expect("render")
        .into_vec();

    assert_eq!(
        messages,
        vec![
            "must be at least 3 characters".to_owned(),
            "may only contain lowercase letters, digits and underscores".to_owned(),
        ]
    );
}

// ============================================================================
// Scenario: Fail-fast result is contained in the accumulated result
// ============================================================================

#[test]
fn fail_fast_failure_is_among_accumulated_failures() {
    let validator = signup_validator();
    let value = FieldValue::from("THIS_NAME_IS_FAR_TOO_LONG");

    let first = validator
        .validate("account", "username", &value, ValidationMode::FailFast)
        .expect("registered field");
    let all = validator
        .validate("account", "username", &value, ValidationMode::Accumulate)
        .expect("registered field");

    let ValidationOutcome::Invalid(failure) = &first else {
        panic!("expected a single failure, got {first:?}");
    };
    assert_eq!(failure.failed_rule.kind(), RuleKind::MaxLength);
    assert!(all.failures().contains(failure));
    assert_eq!(all.failures().len(), 2);
}

// ============================================================================
// Scenario: French messages with English fallback
// ============================================================================

#[test]
fn french_messages_fall_back_to_english_per_key() {
    let validator = signup_validator();
    let resolver = resolver();
    let french = Locale::new("fr-FR");

    let too_young = validator
        .validate("account", "age", &FieldValue::Integer(9), ValidationMode::FailFast)
        .expect("registered field");
    let blank = validator
        .validate("account", "displayName", &FieldValue::from("   "), ValidationMode::FailFast)
        .expect("registered field");

    assert_eq!(
        resolver.render(&too_young, &french).expect("render"),
        RenderedMessage::Single("doit être compris entre 13 et 120".to_owned())
    );
    assert_eq!(
        resolver.render(&blank, &french).expect("render"),
        RenderedMessage::Single("must not be blank".to_owned())
    );
}

// ============================================================================
// Scenario: One validator serves many threads
// ============================================================================

#[test]
fn validator_is_shared_across_threads() {
    let validator = Arc::new(signup_validator());

    let handles: Vec<_> = ["ok_name", "x", "fine_too", "NOPE"]
        .into_iter()
        .map(|name| {
            let shared = Arc::clone(&validator);
            thread::spawn(move || {
                shared
                    .validate("account", "username", &FieldValue::from(name), ValidationMode::FailFast)
                    .map(|outcome| outcome.is_valid())
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread").expect("registered field"))
        .collect();

    assert_eq!(results, vec![true, false, true, false]);
}
