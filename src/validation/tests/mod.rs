//! Unit tests for the validation module.
//!
//! Tests are organised by component, covering happy paths, error cases,
//! and edge cases for all public APIs.

mod domain_tests;
mod resolver_tests;
