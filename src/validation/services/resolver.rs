//! Message resolver: turns validation outcomes into localized text.

use minijinja::{Environment, UndefinedBehavior};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::validation::{
    domain::{Constraint, Locale, MessageKey, ValidationFailure, ValidationOutcome},
    error::RenderError,
    ports::TemplateStore,
};

/// What to do when no template exists for the requested locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTemplatePolicy {
    /// Try the base language, then the default locale, then render the
    /// message key itself so the gap stays visible.
    #[default]
    FallBack,
    /// Fail with [`RenderError::MissingTemplate`].
    Error,
}

/// Configuration for message resolution.
///
/// # Examples
///
/// ```
/// use fieldrules::validation::services::{MissingTemplatePolicy, ResolverConfig};
///
/// let config = ResolverConfig::default();
/// assert_eq!(config.default_locale.as_str(), "en");
/// assert_eq!(config.missing_template, MissingTemplatePolicy::FallBack);
///
/// let strict = ResolverConfig::strict();
/// assert_eq!(strict.missing_template, MissingTemplatePolicy::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Locale consulted when the requested one has no template.
    pub default_locale: Locale,
    /// Behaviour for keys with no template in the requested locale.
    pub missing_template: MissingTemplatePolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::new("en"),
            missing_template: MissingTemplatePolicy::FallBack,
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration that reports missing templates as errors.
    ///
    /// Useful in tests that check catalog completeness.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            missing_template: MissingTemplatePolicy::Error,
            ..Self::default()
        }
    }

    /// Replaces the default locale.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = locale.into();
        self
    }
}

/// Rendered text for an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedMessage {
    /// The outcome was valid; there is nothing to show.
    None,
    /// Message for a single failure.
    Single(String),
    /// Messages for accumulated failures, in evaluation order.
    Many(Vec<String>),
}

impl RenderedMessage {
    /// Returns `true` when there is no message.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the message of a single failure.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(message) => Some(message),
            Self::None | Self::Many(_) => None,
        }
    }

    /// Returns every message as an ordered list.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::Single(message) => vec![message],
            Self::Many(messages) => messages,
        }
    }
}

/// Renders validation outcomes using locale-scoped templates.
///
/// Templates are `minijinja` templates. Numbered placeholders such as
/// `{0}` address the failure's substitution values and bare `{name}`
/// placeholders address context variables: `value`, `field`, `entity`,
/// `key`, `params`, and per kind `min`, `max`, `lo`, `hi`, `pattern` or
/// `predicate`.
///
/// Placeholders that resolve to nothing, such as `{1}` on a rule with one
/// substitution value or a misspelled name, fail with
/// [`RenderError::TemplateRender`] instead of rendering as blank text.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fieldrules::validation::adapters::memory::InMemoryTemplateStore;
/// use fieldrules::validation::domain::{ConstraintRule, FieldPath, FieldValue, Locale, ValidationFailure, ValidationOutcome};
/// use fieldrules::validation::services::MessageResolver;
///
/// let resolver = MessageResolver::new(Arc::new(InMemoryTemplateStore::english_defaults()));
/// let rule = ConstraintRule::min_length(2);
/// let failure = ValidationFailure::new(
///     FieldPath::new("person", "firstName"),
///     &rule,
///     &FieldValue::from("B"),
/// );
///
/// let rendered = resolver
///     .render(&ValidationOutcome::Invalid(failure), &Locale::new("en"))
///     .expect("render");
/// assert_eq!(rendered.as_single(), Some("must be at least 2 characters"));
/// ```
#[derive(Debug, Clone)]
pub struct MessageResolver<S>
where
    S: TemplateStore,
{
    store: Arc<S>,
    config: ResolverConfig,
}

impl<S> MessageResolver<S>
where
    S: TemplateStore,
{
    /// Creates a resolver with the default configuration.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    /// Creates a resolver with a custom configuration.
    #[must_use]
    pub const fn with_config(store: Arc<S>, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    /// Returns the resolver configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Renders an outcome for `locale`.
    ///
    /// A valid outcome renders to [`RenderedMessage::None`] without
    /// consulting the store.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingTemplate`] under
    /// [`MissingTemplatePolicy::Error`], and
    /// [`RenderError::TemplateRender`] for malformed templates.
    pub fn render(
        &self,
        outcome: &ValidationOutcome,
        locale: &Locale,
    ) -> Result<RenderedMessage, RenderError> {
        match outcome {
            ValidationOutcome::Valid => Ok(RenderedMessage::None),
            ValidationOutcome::Invalid(failure) => {
                self.render_failure(failure, locale).map(RenderedMessage::Single)
            }
            ValidationOutcome::InvalidMany(failures) => failures
                .iter()
                .map(|failure| self.render_failure(failure, locale))
                .collect::<Result<Vec<_>, _>>()
                .map(RenderedMessage::Many),
        }
    }

    /// Renders a single failure for `locale`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::render`].
    pub fn render_failure(
        &self,
        failure: &ValidationFailure,
        locale: &Locale,
    ) -> Result<String, RenderError> {
        let Some(template) = self.resolve_template(&failure.message_key, locale)? else {
            return Ok(failure.message_key.to_string());
        };
        render_template(&failure.message_key, &template, &build_template_context(failure))
    }

    /// Finds the template for `key`, walking the locale fallback chain.
    ///
    /// Returns `Ok(None)` when the policy allows falling back to the raw
    /// key.
    fn resolve_template(
        &self,
        key: &MessageKey,
        locale: &Locale,
    ) -> Result<Option<String>, RenderError> {
        let requested = requested_chain(locale);
        if let Some(template) = self.first_template(key, &requested) {
            return Ok(Some(template));
        }

        if self.config.missing_template == MissingTemplatePolicy::Error {
            return Err(RenderError::MissingTemplate {
                key: key.clone(),
                locale: locale.clone(),
            });
        }

        let defaults: Vec<Locale> = requested_chain(&self.config.default_locale)
            .into_iter()
            .filter(|candidate| !requested.contains(candidate))
            .collect();
        let fallback = self.first_template(key, &defaults);
        if fallback.is_some() {
            tracing::debug!(%key, %locale, default = %self.config.default_locale, "using default locale template");
        } else {
            tracing::warn!(%key, %locale, "no template found; rendering message key");
        }
        Ok(fallback)
    }

    fn first_template(&self, key: &MessageKey, locales: &[Locale]) -> Option<String> {
        locales
            .iter()
            .find_map(|candidate| self.store.lookup_template(key, candidate))
    }
}

fn requested_chain(locale: &Locale) -> Vec<Locale> {
    let mut chain = vec![locale.clone()];
    chain.extend(locale.base_language());
    chain
}

fn render_template(
    key: &MessageKey,
    template: &str,
    context: &Map<String, Value>,
) -> Result<String, RenderError> {
    let mut environment = Environment::new();
    environment.set_undefined_behavior(UndefinedBehavior::Strict);
    environment
        .render_str(&expand_placeholders(template), context)
        .map_err(|error| RenderError::TemplateRender {
            key: key.clone(),
            reason: error.to_string(),
        })
}

fn build_template_context(failure: &ValidationFailure) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("key".to_owned(), Value::String(failure.message_key.to_string()));
    context.insert("entity".to_owned(), Value::String(failure.path.entity.to_string()));
    context.insert("field".to_owned(), Value::String(failure.path.field.to_string()));
    context.insert("value".to_owned(), to_value(&failure.actual_value));
    context.insert("params".to_owned(), to_value(&failure.substitution_values));

    match failure.failed_rule.constraint() {
        Constraint::MinLength(min) => {
            context.insert("min".to_owned(), Value::from(*min));
        }
        Constraint::MaxLength(max) => {
            context.insert("max".to_owned(), Value::from(*max));
        }
        Constraint::Range { lo, hi } => {
            context.insert("lo".to_owned(), to_value(lo));
            context.insert("hi".to_owned(), to_value(hi));
        }
        Constraint::Pattern(pattern) => {
            context.insert("pattern".to_owned(), Value::String(pattern.as_str().to_owned()));
        }
        Constraint::Custom { predicate, .. } => {
            context.insert("predicate".to_owned(), Value::String(predicate.to_string()));
        }
    }
    context
}

fn to_value(value: &impl serde::Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Rewrites bare `{0}` and `{name}` placeholders as template expressions.
///
/// Template syntax that already uses `{{`, `{%` or `{#` passes through
/// untouched, as does any `{` not followed by a placeholder token.
fn expand_placeholders(template: &str) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let (before, tail) = rest.split_at(start);
        output.push_str(before);
        let inner = tail.strip_prefix('{').unwrap_or(tail);

        if let Some(delimiter) = inner.chars().next().filter(|c| matches!(*c, '{' | '%' | '#')) {
            output.push('{');
            output.push(delimiter);
            rest = inner.strip_prefix(delimiter).unwrap_or(inner);
            continue;
        }

        let token: String = inner
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        let after_token = inner.get(token.len()..).and_then(|after| after.strip_prefix('}'));

        match after_token {
            Some(remaining) if !token.is_empty() => {
                if token.chars().all(|c| c.is_ascii_digit()) {
                    output.push_str(&format!("{{{{ params[{token}] }}}}"));
                } else {
                    output.push_str(&format!("{{{{ {token} }}}}"));
                }
                rest = remaining;
            }
            _ => {
                output.push('{');
                rest = inner;
            }
        }
    }

    output.push_str(rest);
    output
}
