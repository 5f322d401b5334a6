//! Domain types for field validation.
//!
//! Pure value types with no infrastructure dependencies. Rules, field
//! specifications and outcomes are immutable after construction.

mod field;
mod keys;
mod outcome;
mod rule;
mod value;

pub use field::FieldSpec;
pub use keys::{EntityKey, FieldKey, FieldPath, Locale, MessageKey, PredicateId};
pub use outcome::{ValidationFailure, ValidationMode, ValidationOutcome};
pub use rule::{Constraint, ConstraintRule, Pattern, RuleDefinition, RuleKind};
pub use value::{FieldValue, Number, RuleParam};
