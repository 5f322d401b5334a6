//! Rule registry: field specifications keyed by `(entity, field)`.
//!
//! The registry has two phases. While open it accepts registrations and
//! refuses lookups; once sealed it refuses registrations and serves lookups.
//! Registration takes `&mut self`, so a sealed registry shared through an
//! `Arc` is read concurrently without locking.

mod global;

pub use global::{global, install_global};

use crate::validation::{
    domain::{ConstraintRule, EntityKey, FieldKey, FieldPath, FieldSpec},
    error::{RegistryError, RegistryResult},
};
use std::collections::HashMap;

/// Registry of field specifications.
///
/// # Examples
///
/// ```
/// use fieldrules::validation::domain::ConstraintRule;
/// use fieldrules::validation::registry::RuleRegistry;
///
/// let mut registry = RuleRegistry::new();
/// registry
///     .register("person", "firstName", [ConstraintRule::min_length(2)])
///     .expect("first registration succeeds");
/// registry.seal();
///
/// let spec = registry.lookup("person", "firstName").expect("registered");
/// assert_eq!(spec.rules().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    fields: HashMap<FieldPath, FieldSpec>,
    order: Vec<FieldPath>,
    sealed: bool,
}

impl RuleRegistry {
    /// Creates an empty, open registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the rules for a field.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistrySealed`] after [`Self::seal`], and
    /// [`RegistryError::DuplicateFieldSpec`] when the pair already has rules.
    /// Existing specifications are never overwritten.
    pub fn register(
        &mut self,
        entity: impl Into<EntityKey>,
        field: impl Into<FieldKey>,
        rules: impl IntoIterator<Item = ConstraintRule>,
    ) -> RegistryResult<()> {
        self.insert(FieldSpec::new(entity, field, rules))
    }

    /// Registers a prebuilt field specification.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register`].
    pub fn insert(&mut self, spec: FieldSpec) -> RegistryResult<()> {
        let path = spec.path().clone();
        if self.sealed {
            return Err(RegistryError::RegistrySealed(path));
        }
        if self.fields.contains_key(&path) {
            return Err(RegistryError::DuplicateFieldSpec(path));
        }

        tracing::debug!(field = %path, rules = spec.rules().len(), "registered field rules");
        self.order.push(path.clone());
        self.fields.insert(path, spec);
        Ok(())
    }

    /// Ends the registration phase. Sealing twice has no further effect.
    pub fn seal(&mut self) {
        if !self.sealed {
            self.sealed = true;
            tracing::info!(fields = self.fields.len(), "rule registry sealed");
        }
    }

    /// Returns whether the registry is sealed.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Looks up the specification for a field.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistryNotSealed`] before sealing and
    /// [`RegistryError::UnknownField`] when nothing is registered.
    pub fn lookup(
        &self,
        entity: impl Into<EntityKey>,
        field: impl Into<FieldKey>,
    ) -> RegistryResult<&FieldSpec> {
        self.lookup_path(&FieldPath::new(entity, field))
    }

    /// Looks up the specification for a field path.
    ///
    /// # Errors
    ///
    /// Same as [`Self::lookup`].
    pub fn lookup_path(&self, path: &FieldPath) -> RegistryResult<&FieldSpec> {
        if !self.sealed {
            return Err(RegistryError::RegistryNotSealed);
        }
        self.fields
            .get(path)
            .ok_or_else(|| RegistryError::UnknownField(path.clone()))
    }

    /// Returns the number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over every specification in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.order.iter().filter_map(|path| self.fields.get(path))
    }

    /// Iterates over the specifications of one entity in registration order.
    pub fn entity_fields<'a>(&'a self, entity: &'a EntityKey) -> impl Iterator<Item = &'a FieldSpec> {
        self.fields().filter(move |spec| spec.entity() == entity)
    }
}
