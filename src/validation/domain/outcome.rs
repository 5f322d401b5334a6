//! Structured validation results.

use super::{ConstraintRule, FieldPath, FieldValue, MessageKey, RuleParam};
use serde::{Deserialize, Serialize};

/// Whether evaluation stops at the first failing rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first failing rule.
    #[default]
    FailFast,
    /// Evaluate every rule and report all failures.
    Accumulate,
}

/// One failed rule, with everything needed to render a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Field the value was submitted for.
    pub path: FieldPath,
    /// The rule that rejected the value.
    pub failed_rule: ConstraintRule,
    /// The rejected value.
    pub actual_value: FieldValue,
    /// Template key for the message.
    pub message_key: MessageKey,
    /// Values for numbered placeholders.
    pub substitution_values: Vec<RuleParam>,
}

impl ValidationFailure {
    /// Records a failure of `rule` for `value`.
    #[must_use]
    pub fn new(path: FieldPath, rule: &ConstraintRule, value: &FieldValue) -> Self {
        Self {
            path,
            message_key: rule.message_key().clone(),
            substitution_values: rule.substitution_values(),
            failed_rule: rule.clone(),
            actual_value: value.clone(),
        }
    }
}

/// Result of validating one value against one field.
///
/// Failures here are expected results, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "failures", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Every rule accepted the value.
    Valid,
    /// The first failing rule, in fail-fast mode.
    Invalid(ValidationFailure),
    /// Every failing rule in evaluation order, in accumulate mode.
    InvalidMany(Vec<ValidationFailure>),
}

impl ValidationOutcome {
    /// Returns `true` for [`ValidationOutcome::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failures in evaluation order; empty when valid.
    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            Self::Valid => &[],
            Self::Invalid(failure) => std::slice::from_ref(failure),
            Self::InvalidMany(failures) => failures,
        }
    }
}
