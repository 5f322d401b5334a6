//! Custom predicate port.

use crate::validation::domain::{FieldValue, RuleParam};

/// A named check backing `Custom` rules.
///
/// Any `Fn(&FieldValue, &[RuleParam]) -> bool` closure that is
/// `Send + Sync` is a predicate.
pub trait FieldPredicate: Send + Sync {
    /// Returns `true` when `value` satisfies the predicate.
    fn test(&self, value: &FieldValue, arguments: &[RuleParam]) -> bool;
}

impl<F> FieldPredicate for F
where
    F: Fn(&FieldValue, &[RuleParam]) -> bool + Send + Sync,
{
    fn test(&self, value: &FieldValue, arguments: &[RuleParam]) -> bool {
        self(value, arguments)
    }
}
