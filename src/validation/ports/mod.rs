//! Port trait definitions for the validation engine.
//!
//! Ports are the seams to collaborators the engine does not own: the
//! localization store and application-supplied predicates.

pub mod localization;
pub mod predicate;

pub use localization::TemplateStore;
pub use predicate::FieldPredicate;
