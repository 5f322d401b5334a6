//! Declarative field validation with localized messages.
//!
//! # Architecture
//!
//! - **Domain**: rules, field specifications, values and outcomes
//! - **Registry**: field specifications, populated once and then sealed
//! - **Services**: the [`services::FieldValidator`] and
//!   [`services::MessageResolver`]
//! - **Ports**: the localization store and custom predicates
//! - **Adapters**: an in-memory template catalog
//! - **Config**: declarative tables that populate a registry at startup
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fieldrules::validation::adapters::memory::InMemoryTemplateStore;
//! use fieldrules::validation::domain::{ConstraintRule, FieldValue, Locale, ValidationMode};
//! use fieldrules::validation::predicates::PredicateRegistry;
//! use fieldrules::validation::registry::RuleRegistry;
//! use fieldrules::validation::services::{FieldValidator, MessageResolver};
//!
//! let mut registry = RuleRegistry::new();
//! registry
//!     .register(
//!         "person",
//!         "firstName",
//!         [ConstraintRule::min_length(2), ConstraintRule::max_length(10)],
//!     )
//!     .expect("register");
//! registry.seal();
//!
//! let validator = FieldValidator::new(Arc::new(registry), Arc::new(PredicateRegistry::new()));
//! let resolver = MessageResolver::new(Arc::new(InMemoryTemplateStore::english_defaults()));
//!
//! let outcome = validator
//!     .validate("person", "firstName", &FieldValue::from("Bartholomew"), ValidationMode::FailFast)
//!     .expect("registered field");
//! let message = resolver.render(&outcome, &Locale::new("en")).expect("render");
//! assert_eq!(message.as_single(), Some("can't be more than 10 characters"));
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod predicates;
pub mod registry;
pub mod rules;
pub mod services;

#[cfg(test)]
mod tests;
