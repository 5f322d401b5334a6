//! Fieldrules: declarative field validation with localized messages.
//!
//! This crate attaches ordered constraint rules to entity fields, evaluates
//! candidate values against them, and renders structured failures as
//! localized, parameterized messages.
//!
//! # Architecture
//!
//! Fieldrules follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for collaborators (localization, predicates)
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`validation`]: Rule registry, validator and message resolver

pub mod validation;
