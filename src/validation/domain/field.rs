//! Field specifications owned by the rule registry.

use super::{ConstraintRule, EntityKey, FieldKey, FieldPath};
use serde::{Deserialize, Serialize};

/// The ordered rules attached to one `(entity, field)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    path: FieldPath,
    rules: Vec<ConstraintRule>,
}

impl FieldSpec {
    /// Creates a field specification. Rules keep the given order.
    #[must_use]
    pub fn new(
        entity: impl Into<EntityKey>,
        field: impl Into<FieldKey>,
        rules: impl IntoIterator<Item = ConstraintRule>,
    ) -> Self {
        Self {
            path: FieldPath::new(entity, field),
            rules: rules.into_iter().collect(),
        }
    }

    /// Returns the field address.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the owning entity.
    #[must_use]
    pub const fn entity(&self) -> &EntityKey {
        &self.path.entity
    }

    /// Returns the field key.
    #[must_use]
    pub const fn field(&self) -> &FieldKey {
        &self.path.field
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[ConstraintRule] {
        &self.rules
    }
}
