//! String key newtypes used to address fields, messages, predicates and
//! locales.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_key {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a key from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(&self.0)
            }
        }
    };
}

string_key!(
    /// Identifies the entity (record type) a field belongs to.
    EntityKey
);

string_key!(
    /// Identifies a field within an entity.
    FieldKey
);

string_key!(
    /// Indirection from a failure to a localized template.
    MessageKey
);

string_key!(
    /// Identifies a custom predicate in the predicate registry.
    PredicateId
);

/// Fully qualified address of a field: `entity.field`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    /// Owning entity.
    pub entity: EntityKey,
    /// Field within the entity.
    pub field: FieldKey,
}

impl FieldPath {
    /// Creates a field path.
    #[must_use]
    pub fn new(entity: impl Into<EntityKey>, field: impl Into<FieldKey>) -> Self {
        Self {
            entity: entity.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}.{}", self.entity, self.field)
    }
}

/// Normalized locale tag such as `en` or `en-gb`.
///
/// Tags are trimmed, lowercased, and use `-` as the subtag separator, so
/// `en_GB` and `en-gb` address the same catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Creates a normalized locale tag.
    #[must_use]
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_ascii_lowercase().replace('_', "-"))
    }

    /// Returns the normalized tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the base language for a regional tag (`en-gb` → `en`).
    ///
    /// Returns `None` when the tag has no region subtag.
    #[must_use]
    pub fn base_language(&self) -> Option<Self> {
        self.0
            .split_once('-')
            .map(|(language, _)| Self(language.to_owned()))
            .filter(|language| !language.0.is_empty())
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
