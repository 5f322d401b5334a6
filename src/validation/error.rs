//! Error types for registry, validation, rendering and configuration.
//!
//! Uses `thiserror` for typed variants callers can match on. None of these
//! represent a value failing its constraints; those are reported through
//! [`ValidationOutcome`](super::domain::ValidationOutcome).

use super::domain::{FieldPath, Locale, MessageKey, PredicateId, RuleKind};
use thiserror::Error;

/// Errors raised by the rule registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No field specification is registered for the pair.
    #[error("no validation rules registered for field {0}")]
    UnknownField(FieldPath),

    /// A field specification already exists for the pair.
    #[error("validation rules for field {0} are already registered")]
    DuplicateFieldSpec(FieldPath),

    /// Registration was attempted after the registry was sealed.
    #[error("rule registry is sealed; cannot register field {0}")]
    RegistrySealed(FieldPath),

    /// A lookup was attempted before the registry was sealed.
    #[error("rule registry must be sealed before lookups")]
    RegistryNotSealed,

    /// The process-wide registry has already been installed.
    #[error("a global rule registry is already installed")]
    GlobalAlreadyInstalled,
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised while evaluating rules against a value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The field lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The value's type cannot be checked by the rule.
    #[error("{kind} rule on field {path} cannot check a {actual} value")]
    TypeMismatch {
        /// Field being validated.
        path: FieldPath,
        /// Kind of the rule that could not be applied.
        kind: RuleKind,
        /// Type name of the offending value.
        actual: &'static str,
    },

    /// A custom rule names a predicate that is not registered.
    #[error("custom predicate '{predicate}' used by field {path} is not registered")]
    UnknownPredicate {
        /// Field being validated.
        path: FieldPath,
        /// The missing predicate.
        predicate: PredicateId,
    },
}

impl ValidationError {
    /// Creates a type mismatch error.
    #[must_use]
    pub const fn type_mismatch(path: FieldPath, kind: RuleKind, actual: &'static str) -> Self {
        Self::TypeMismatch { path, kind, actual }
    }

    /// Returns `true` when the error reports an unregistered field.
    #[must_use]
    pub const fn is_unknown_field(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::UnknownField(_)))
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while rendering messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// No template exists for the key in the requested locale.
    #[error("no template for message key '{key}' in locale '{locale}'")]
    MissingTemplate {
        /// The unresolved message key.
        key: MessageKey,
        /// The requested locale.
        locale: Locale,
    },

    /// The template exists but could not be rendered.
    #[error("failed to render template for message key '{key}': {reason}")]
    TemplateRender {
        /// The message key whose template failed.
        key: MessageKey,
        /// Description of the failure.
        reason: String,
    },
}

/// A rule whose parameters do not fit its kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind} rule: {reason}")]
pub struct InvalidRuleError {
    /// Kind of the rejected rule.
    pub kind: RuleKind,
    /// Description of the problem.
    pub reason: String,
}

impl InvalidRuleError {
    /// Creates an invalid rule error.
    #[must_use]
    pub fn new(kind: RuleKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading declarative configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for the expected shape.
    #[error("failed to parse validation configuration: {0}")]
    Parse(String),

    /// A rule definition is malformed.
    #[error("invalid rule at position {index} for field {path}: {source}")]
    InvalidRule {
        /// Field the rule belongs to.
        path: FieldPath,
        /// Zero-based position of the rule.
        index: usize,
        /// Underlying problem.
        source: InvalidRuleError,
    },

    /// Registering the loaded table failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ConfigError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}
