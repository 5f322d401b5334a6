//! Validator service: evaluates values against registered field rules.

use crate::validation::{
    domain::{
        EntityKey, FieldKey, FieldPath, FieldSpec, FieldValue, ValidationFailure, ValidationMode,
        ValidationOutcome,
    },
    error::ValidationResult,
    predicates::PredicateRegistry,
    registry::RuleRegistry,
    rules,
};
use std::sync::Arc;

/// Evaluates candidate values against a sealed [`RuleRegistry`].
///
/// The validator is stateless beyond its shared, read-only collaborators,
/// so one instance may serve any number of threads. It never mutates the
/// value and never logs.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fieldrules::validation::domain::{ConstraintRule, FieldValue, ValidationMode};
/// use fieldrules::validation::predicates::PredicateRegistry;
/// use fieldrules::validation::registry::RuleRegistry;
/// use fieldrules::validation::services::FieldValidator;
///
/// let mut registry = RuleRegistry::new();
/// registry
///     .register(
///         "person",
///         "firstName",
///         [ConstraintRule::min_length(2), ConstraintRule::max_length(10)],
///     )
///     .expect("register");
/// registry.seal();
///
/// let validator = FieldValidator::new(Arc::new(registry), Arc::new(PredicateRegistry::new()));
/// let outcome = validator
///     .validate("person", "firstName", &FieldValue::from("Bo"), ValidationMode::FailFast)
///     .expect("field is registered");
/// assert!(outcome.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct FieldValidator {
    registry: Arc<RuleRegistry>,
    predicates: Arc<PredicateRegistry>,
}

impl FieldValidator {
    /// Creates a validator over a registry and predicate set.
    #[must_use]
    pub const fn new(registry: Arc<RuleRegistry>, predicates: Arc<PredicateRegistry>) -> Self {
        Self {
            registry,
            predicates,
        }
    }

    /// Returns the registry backing this validator.
    #[must_use]
    pub const fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Validates `value` against the rules of `entity.field`.
    ///
    /// In [`ValidationMode::FailFast`] the first failing rule yields
    /// [`ValidationOutcome::Invalid`]. In [`ValidationMode::Accumulate`]
    /// every rule runs and any failures are returned together as
    /// [`ValidationOutcome::InvalidMany`], even a single one.
    ///
    /// # Errors
    ///
    /// Propagates `UnknownField` from the registry, and returns
    /// `TypeMismatch` or `UnknownPredicate` when a rule cannot be applied.
    pub fn validate(
        &self,
        entity: impl Into<EntityKey>,
        field: impl Into<FieldKey>,
        value: &FieldValue,
        mode: ValidationMode,
    ) -> ValidationResult<ValidationOutcome> {
        let spec = self.registry.lookup(entity, field)?;
        self.evaluate(spec, value, mode)
    }

    /// Validates several fields of one entity.
    ///
    /// Outcomes are returned in the order the values are given; the first
    /// structural error aborts the whole record.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate`], for any of the fields.
    pub fn validate_record<'a, I, K>(
        &self,
        entity: impl Into<EntityKey>,
        values: I,
        mode: ValidationMode,
    ) -> ValidationResult<Vec<(FieldKey, ValidationOutcome)>>
    where
        I: IntoIterator<Item = (K, &'a FieldValue)>,
        K: Into<FieldKey>,
    {
        let entity_key = entity.into();
        values
            .into_iter()
            .map(|(field, value)| {
                let path = FieldPath::new(entity_key.clone(), field);
                let spec = self.registry.lookup_path(&path)?;
                let outcome = self.evaluate(spec, value, mode)?;
                Ok((path.field, outcome))
            })
            .collect()
    }

    fn evaluate(
        &self,
        spec: &FieldSpec,
        value: &FieldValue,
        mode: ValidationMode,
    ) -> ValidationResult<ValidationOutcome> {
        let mut failures = Vec::new();

        for rule in spec.rules() {
            if rules::check_rule(spec.path(), rule, value, &self.predicates)? {
                continue;
            }
            let failure = ValidationFailure::new(spec.path().clone(), rule, value);
            match mode {
                ValidationMode::FailFast => return Ok(ValidationOutcome::Invalid(failure)),
                ValidationMode::Accumulate => failures.push(failure),
            }
        }

        if failures.is_empty() {
            Ok(ValidationOutcome::Valid)
        } else {
            Ok(ValidationOutcome::InvalidMany(failures))
        }
    }
}
