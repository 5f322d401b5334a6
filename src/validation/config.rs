//! Declarative validation tables.
//!
//! A table lists, per field, the rules to register at startup:
//!
//! ```json
//! {
//!   "fields": [
//!     {
//!       "entity": "person",
//!       "field": "firstName",
//!       "rules": [
//!         { "kind": "min_length", "parameters": [2] },
//!         { "kind": "max_length", "parameters": [10], "message_key": "person.name.too_long" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::validation::{
    domain::{ConstraintRule, EntityKey, FieldKey, FieldPath, FieldSpec, RuleDefinition},
    error::ConfigError,
    registry::RuleRegistry,
};

/// One field entry of a validation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Owning entity.
    pub entity: EntityKey,
    /// Field within the entity.
    pub field: FieldKey,
    /// Rules in evaluation order.
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

impl FieldEntry {
    /// Builds the field specification, checking every rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] for the first malformed rule.
    pub fn to_spec(&self) -> Result<FieldSpec, ConfigError> {
        let path = FieldPath::new(self.entity.clone(), self.field.clone());
        let rules = self
            .rules
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                ConstraintRule::try_from(definition.clone()).map_err(|source| {
                    ConfigError::InvalidRule {
                        path: path.clone(),
                        index,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FieldSpec::new(path.entity, path.field, rules))
    }
}

/// Declarative table of field rules.
///
/// # Examples
///
/// ```
/// use fieldrules::validation::config::ValidationTable;
///
/// let table = ValidationTable::from_json_str(
///     r#"{ "fields": [ { "entity": "person", "field": "age",
///          "rules": [ { "kind": "range", "parameters": [0, 150] } ] } ] }"#,
/// )
/// .expect("valid table");
///
/// let registry = table.into_registry().expect("registers");
/// assert!(registry.is_sealed());
/// assert!(registry.lookup("person", "age").is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationTable {
    /// Field entries in registration order.
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

impl ValidationTable {
    /// Parses a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document has another shape.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Registers every entry into an open registry without sealing it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] for malformed rules and
    /// [`ConfigError::Registry`] when registration fails.
    pub fn register_into(&self, registry: &mut RuleRegistry) -> Result<(), ConfigError> {
        for entry in &self.fields {
            registry.insert(entry.to_spec()?)?;
        }
        Ok(())
    }

    /// Builds and seals a registry holding every entry.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register_into`].
    pub fn into_registry(self) -> Result<RuleRegistry, ConfigError> {
        let mut registry = RuleRegistry::new();
        self.register_into(&mut registry)?;
        registry.seal();
        Ok(registry)
    }
}
