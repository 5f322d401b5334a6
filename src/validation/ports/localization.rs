//! Localization store port.

use crate::validation::domain::{Locale, MessageKey};

/// Source of locale-scoped message templates.
///
/// Implementations must be thread-safe; the resolver shares one store
/// across every render call.
pub trait TemplateStore: Send + Sync {
    /// Returns the template for `key` in exactly `locale`, without any
    /// fallback. Fallback across locales is the resolver's concern.
    fn lookup_template(&self, key: &MessageKey, locale: &Locale) -> Option<String>;
}
