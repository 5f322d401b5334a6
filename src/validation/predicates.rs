//! Capability map from predicate identifiers to custom checks.

use crate::validation::{
    domain::{FieldValue, PredicateId, RuleParam},
    ports::FieldPredicate,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Predicates available to `Custom` rules, looked up by identifier.
///
/// # Examples
///
/// ```
/// use fieldrules::validation::domain::{FieldValue, RuleParam};
/// use fieldrules::validation::predicates::PredicateRegistry;
///
/// let predicates = PredicateRegistry::new()
///     .with_predicate("even", |value: &FieldValue, _: &[RuleParam]| {
///         matches!(value, FieldValue::Integer(n) if n % 2 == 0)
///     });
/// assert!(predicates.contains(&"even".into()));
/// ```
#[derive(Clone, Default)]
pub struct PredicateRegistry {
    predicates: HashMap<PredicateId, Arc<dyn FieldPredicate>>,
}

impl PredicateRegistry {
    /// Creates an empty predicate registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in predicates.
    ///
    /// - `non_blank`: text containing a non-whitespace character.
    /// - `one_of`: text or number equal to one of the rule arguments.
    /// - `not_null`: any value except null.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new()
            .with_predicate("non_blank", non_blank)
            .with_predicate("one_of", one_of)
            .with_predicate("not_null", not_null)
    }

    /// Adds a predicate, replacing any previous one with the same id.
    #[must_use]
    pub fn with_predicate(
        mut self,
        id: impl Into<PredicateId>,
        predicate: impl FieldPredicate + 'static,
    ) -> Self {
        self.register(id, predicate);
        self
    }

    /// Adds a predicate, replacing any previous one with the same id.
    pub fn register(&mut self, id: impl Into<PredicateId>, predicate: impl FieldPredicate + 'static) {
        let key = id.into();
        if self.predicates.contains_key(&key) {
            tracing::warn!(predicate = %key, "replacing registered predicate");
        }
        self.predicates.insert(key, Arc::new(predicate));
    }

    /// Returns the predicate registered under `id`.
    #[must_use]
    pub fn get(&self, id: &PredicateId) -> Option<&dyn FieldPredicate> {
        self.predicates.get(id).map(AsRef::as_ref)
    }

    /// Returns whether a predicate is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &PredicateId) -> bool {
        self.predicates.contains_key(id)
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.predicates.keys().map(PredicateId::as_str).collect();
        ids.sort_unstable();
        formatter
            .debug_struct("PredicateRegistry")
            .field("predicates", &ids)
            .finish()
    }
}

fn non_blank(value: &FieldValue, _arguments: &[RuleParam]) -> bool {
    value
        .as_text()
        .is_some_and(|text| !text.trim().is_empty())
}

fn one_of(value: &FieldValue, arguments: &[RuleParam]) -> bool {
    arguments.iter().any(|allowed| match (value, allowed) {
        (FieldValue::Text(text), RuleParam::Text(option)) => text == option,
        _ => match (value.as_number(), allowed.as_number()) {
            (Some(actual), Some(option)) => actual == option,
            _ => false,
        },
    })
}

const fn not_null(value: &FieldValue, _arguments: &[RuleParam]) -> bool {
    !matches!(value, FieldValue::Null)
}
