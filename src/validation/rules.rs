//! Predicates for each constraint kind.
//!
//! Each check is a pure function returning `Ok(true)` when the value
//! satisfies the constraint and `Ok(false)` when it does not. `Err` is
//! reserved for checks that cannot be applied at all.

use crate::validation::{
    domain::{
        Constraint, ConstraintRule, FieldPath, FieldValue, Number, Pattern, PredicateId, RuleKind,
        RuleParam,
    },
    error::{ValidationError, ValidationResult},
    predicates::PredicateRegistry,
};
use std::cmp::Ordering;

/// Applies one rule to `value`.
///
/// # Errors
///
/// Returns [`ValidationError::TypeMismatch`] when the rule cannot check the
/// value's type and [`ValidationError::UnknownPredicate`] when a custom rule
/// names an unregistered predicate.
pub fn check_rule(
    path: &FieldPath,
    rule: &ConstraintRule,
    value: &FieldValue,
    predicates: &PredicateRegistry,
) -> ValidationResult<bool> {
    match rule.constraint() {
        Constraint::MinLength(min) => check_min_length(path, *min, value),
        Constraint::MaxLength(max) => check_max_length(path, *max, value),
        Constraint::Range { lo, hi } => check_range(path, *lo, *hi, value),
        Constraint::Pattern(pattern) => check_pattern(path, pattern, value),
        Constraint::Custom {
            predicate,
            arguments,
        } => check_custom(path, predicate, arguments, value, predicates),
    }
}

/// Valid iff `length(value) >= min`.
///
/// # Errors
///
/// Returns [`ValidationError::TypeMismatch`] for values without a length.
pub fn check_min_length(path: &FieldPath, min: usize, value: &FieldValue) -> ValidationResult<bool> {
    let length = measure(path, RuleKind::MinLength, value)?;
    Ok(length >= min)
}

/// Valid iff `length(value) <= max`.
///
/// # Errors
///
/// Returns [`ValidationError::TypeMismatch`] for values without a length.
pub fn check_max_length(path: &FieldPath, max: usize, value: &FieldValue) -> ValidationResult<bool> {
    let length = measure(path, RuleKind::MaxLength, value)?;
    Ok(length <= max)
}

/// Valid iff `lo <= value <= hi`.
///
/// # Errors
///
/// Returns [`ValidationError::TypeMismatch`] for non-numeric values and
/// for NaN, which has no ordering.
pub fn check_range(
    path: &FieldPath,
    lo: Number,
    hi: Number,
    value: &FieldValue,
) -> ValidationResult<bool> {
    let mismatch = || ValidationError::type_mismatch(path.clone(), RuleKind::Range, value.type_name());
    let number = value.as_number().ok_or_else(mismatch)?;
    let above_low = number.compare(lo).ok_or_else(mismatch)?;
    let below_high = number.compare(hi).ok_or_else(mismatch)?;
    Ok(above_low != Ordering::Less && below_high != Ordering::Greater)
}

/// Valid iff the pattern matches the text value.
///
/// # Errors
///
/// Returns [`ValidationError::TypeMismatch`] for non-text values.
pub fn check_pattern(
    path: &FieldPath,
    pattern: &Pattern,
    value: &FieldValue,
) -> ValidationResult<bool> {
    let text = value.as_text().ok_or_else(|| {
        ValidationError::type_mismatch(path.clone(), RuleKind::Pattern, value.type_name())
    })?;
    Ok(pattern.is_match(text))
}

/// Dispatches to a registered predicate.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownPredicate`] when nothing is registered
/// under `predicate`.
pub fn check_custom(
    path: &FieldPath,
    predicate: &PredicateId,
    arguments: &[RuleParam],
    value: &FieldValue,
    predicates: &PredicateRegistry,
) -> ValidationResult<bool> {
    let check = predicates
        .get(predicate)
        .ok_or_else(|| ValidationError::UnknownPredicate {
            path: path.clone(),
            predicate: predicate.clone(),
        })?;
    Ok(check.test(value, arguments))
}

fn measure(path: &FieldPath, kind: RuleKind, value: &FieldValue) -> ValidationResult<usize> {
    value
        .length()
        .ok_or_else(|| ValidationError::type_mismatch(path.clone(), kind, value.type_name()))
}
