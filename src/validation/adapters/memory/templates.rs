//! In-memory localization store.

use std::collections::HashMap;

use crate::validation::{
    domain::{Locale, MessageKey},
    error::ConfigError,
    ports::TemplateStore,
};

const ENGLISH_DEFAULTS: [(&str, &str); 5] = [
    ("validation.min_length", "must be at least {0} characters"),
    ("validation.max_length", "can't be more than {0} characters"),
    ("validation.range", "must be between {0} and {1}"),
    ("validation.pattern", "is not in the expected format"),
    ("validation.custom", "is invalid"),
];

/// Template catalog held in memory, keyed by locale then message key.
///
/// # Examples
///
/// ```
/// use fieldrules::validation::adapters::memory::InMemoryTemplateStore;
/// use fieldrules::validation::domain::{Locale, MessageKey};
/// use fieldrules::validation::ports::TemplateStore;
///
/// let store = InMemoryTemplateStore::english_defaults()
///     .with_template("fr", "validation.min_length", "doit contenir au moins {0} caractères");
///
/// let key = MessageKey::new("validation.min_length");
/// assert!(store.lookup_template(&key, &Locale::new("fr")).is_some());
/// assert!(store.lookup_template(&key, &Locale::new("de")).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    catalogs: HashMap<Locale, HashMap<MessageKey, String>>,
}

impl InMemoryTemplateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the built-in English templates for every
    /// default message key.
    #[must_use]
    pub fn english_defaults() -> Self {
        ENGLISH_DEFAULTS
            .iter()
            .fold(Self::new(), |store, (key, template)| {
                store.with_template("en", *key, *template)
            })
    }

    /// Parses a catalog of the form `{ "<locale>": { "<key>": "<template>" } }`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document has another shape.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let raw: HashMap<String, HashMap<MessageKey, String>> = serde_json::from_str(document)?;
        let mut store = Self::new();
        for (locale, templates) in raw {
            store.extend(Locale::new(locale), templates);
        }
        Ok(store)
    }

    /// Adds or replaces one template.
    #[must_use]
    pub fn with_template(
        mut self,
        locale: impl Into<Locale>,
        key: impl Into<MessageKey>,
        template: impl Into<String>,
    ) -> Self {
        self.insert(locale, key, template);
        self
    }

    /// Adds or replaces one template.
    pub fn insert(
        &mut self,
        locale: impl Into<Locale>,
        key: impl Into<MessageKey>,
        template: impl Into<String>,
    ) {
        self.catalogs
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Adds or replaces every template of `other`.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        for (locale, templates) in other.catalogs {
            self.extend(locale, templates);
        }
        self
    }

    /// Returns the locales with at least one template.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.catalogs.keys()
    }

    /// Returns the number of templates across every locale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.values().map(HashMap::len).sum()
    }

    /// Returns whether the store holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn extend(&mut self, locale: Locale, templates: HashMap<MessageKey, String>) {
        self.catalogs.entry(locale).or_default().extend(templates);
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn lookup_template(&self, key: &MessageKey, locale: &Locale) -> Option<String> {
        self.catalogs
            .get(locale)
            .and_then(|templates| templates.get(key))
            .cloned()
    }
}
