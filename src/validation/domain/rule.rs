//! Declarative constraint rules.

use super::{MessageKey, Number, PredicateId, RuleParam};
use crate::validation::error::InvalidRuleError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The kind of check a rule performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Minimum length of text or lists.
    MinLength,
    /// Maximum length of text or lists.
    MaxLength,
    /// Inclusive numeric range.
    Range,
    /// Regular expression match on text.
    Pattern,
    /// Dispatch to a registered predicate.
    Custom,
}

impl RuleKind {
    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Range => "range",
            Self::Pattern => "pattern",
            Self::Custom => "custom",
        }
    }

    /// Returns the message key used when a rule does not name its own.
    #[must_use]
    pub fn default_message_key(self) -> MessageKey {
        MessageKey::new(format!("validation.{}", self.as_str()))
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A compiled regular expression compared by its source text.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRuleError`] when the expression does not compile.
    pub fn new(source: &str) -> Result<Self, InvalidRuleError> {
        Regex::new(source)
            .map(Self)
            .map_err(|error| InvalidRuleError::new(RuleKind::Pattern, error.to_string()))
    }

    /// Returns the source text of the expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether the expression matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// A typed constraint together with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Valid iff `length(value) >= n`.
    MinLength(usize),
    /// Valid iff `length(value) <= n`.
    MaxLength(usize),
    /// Valid iff `lo <= value <= hi`.
    Range {
        /// Inclusive lower bound.
        lo: Number,
        /// Inclusive upper bound.
        hi: Number,
    },
    /// Valid iff the text value matches.
    Pattern(Pattern),
    /// Valid iff the named predicate accepts the value.
    Custom {
        /// Predicate to dispatch to.
        predicate: PredicateId,
        /// Extra arguments handed to the predicate.
        arguments: Vec<RuleParam>,
    },
}

impl Constraint {
    /// Returns the rule kind.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::MinLength(_) => RuleKind::MinLength,
            Self::MaxLength(_) => RuleKind::MaxLength,
            Self::Range { .. } => RuleKind::Range,
            Self::Pattern(_) => RuleKind::Pattern,
            Self::Custom { .. } => RuleKind::Custom,
        }
    }
}

/// A single declarative check attached to a field.
///
/// Rules are immutable once built. The serialized form is the flat
/// `{ kind, parameters, message_key }` record used by configuration tables.
///
/// # Examples
///
/// ```
/// use fieldrules::validation::domain::{ConstraintRule, RuleKind, RuleParam};
///
/// let rule = ConstraintRule::min_length(2);
/// assert_eq!(rule.kind(), RuleKind::MinLength);
/// assert_eq!(rule.parameters(), vec![RuleParam::Integer(2)]);
/// assert_eq!(rule.message_key().as_str(), "validation.min_length");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleDefinition", into = "RuleDefinition")]
pub struct ConstraintRule {
    constraint: Constraint,
    message_key: MessageKey,
    substitution_values: Option<Vec<RuleParam>>,
}

impl ConstraintRule {
    /// Creates a rule with an explicit message key.
    #[must_use]
    pub const fn new(constraint: Constraint, message_key: MessageKey) -> Self {
        Self {
            constraint,
            message_key,
            substitution_values: None,
        }
    }

    /// Creates a rule using the kind's default message key.
    #[must_use]
    pub fn with_default_key(constraint: Constraint) -> Self {
        let message_key = constraint.kind().default_message_key();
        Self::new(constraint, message_key)
    }

    /// Creates a minimum length rule.
    #[must_use]
    pub fn min_length(min: usize) -> Self {
        Self::with_default_key(Constraint::MinLength(min))
    }

    /// Creates a maximum length rule.
    #[must_use]
    pub fn max_length(max: usize) -> Self {
        Self::with_default_key(Constraint::MaxLength(max))
    }

    /// Creates an inclusive range rule.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRuleError`] when a bound is NaN or `lo > hi`.
    pub fn range(lo: impl Into<Number>, hi: impl Into<Number>) -> Result<Self, InvalidRuleError> {
        let low = lo.into();
        let high = hi.into();
        match low.compare(high) {
            Some(Ordering::Less | Ordering::Equal) => {
                Ok(Self::with_default_key(Constraint::Range { lo: low, hi: high }))
            }
            Some(Ordering::Greater) => Err(InvalidRuleError::new(
                RuleKind::Range,
                format!("lower bound {low} exceeds upper bound {high}"),
            )),
            None => Err(InvalidRuleError::new(
                RuleKind::Range,
                "bounds must be comparable numbers",
            )),
        }
    }

    /// Creates a regular expression rule.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRuleError`] when the expression does not compile.
    pub fn pattern(source: &str) -> Result<Self, InvalidRuleError> {
        Pattern::new(source).map(|pattern| Self::with_default_key(Constraint::Pattern(pattern)))
    }

    /// Creates a rule dispatching to a registered predicate.
    #[must_use]
    pub fn custom(
        predicate: impl Into<PredicateId>,
        arguments: impl IntoIterator<Item = RuleParam>,
    ) -> Self {
        Self::with_default_key(Constraint::Custom {
            predicate: predicate.into(),
            arguments: arguments.into_iter().collect(),
        })
    }

    /// Replaces the message key.
    #[must_use]
    pub fn with_message_key(mut self, message_key: impl Into<MessageKey>) -> Self {
        self.message_key = message_key.into();
        self
    }

    /// Replaces the values substituted into numbered message placeholders.
    ///
    /// Without an override the values are derived from the constraint.
    #[must_use]
    pub fn with_substitution_values(mut self, values: impl IntoIterator<Item = RuleParam>) -> Self {
        self.substitution_values = Some(values.into_iter().collect());
        self
    }

    /// Builds a rule from its flat representation.
    ///
    /// `Custom` rules take the predicate identifier as the first parameter
    /// and hand the rest to the predicate.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRuleError`] when the parameters do not fit the kind.
    pub fn from_parts(
        kind: RuleKind,
        parameters: &[RuleParam],
        message_key: Option<MessageKey>,
    ) -> Result<Self, InvalidRuleError> {
        let mut rule = match (kind, parameters) {
            (RuleKind::MinLength, [bound]) => Self::min_length(length_bound(kind, bound)?),
            (RuleKind::MaxLength, [bound]) => Self::max_length(length_bound(kind, bound)?),
            (RuleKind::Range, [lo, hi]) => Self::range(numeric_bound(lo)?, numeric_bound(hi)?)?,
            (RuleKind::Pattern, [RuleParam::Text(source)]) => Self::pattern(source)?,
            (RuleKind::Custom, [RuleParam::Text(predicate), arguments @ ..]) => {
                Self::custom(predicate.as_str(), arguments.iter().cloned())
            }
            _ => return Err(InvalidRuleError::new(kind, expected_parameters(kind))),
        };
        if let Some(key) = message_key {
            rule.message_key = key;
        }
        Ok(rule)
    }

    /// Returns the typed constraint.
    #[must_use]
    pub const fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Returns the rule kind.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.constraint.kind()
    }

    /// Returns the message key for failures of this rule.
    #[must_use]
    pub const fn message_key(&self) -> &MessageKey {
        &self.message_key
    }

    /// Returns the flat parameter list, in declaration order.
    #[must_use]
    pub fn parameters(&self) -> Vec<RuleParam> {
        match &self.constraint {
            Constraint::Custom {
                predicate,
                arguments,
            } => std::iter::once(RuleParam::Text(predicate.to_string()))
                .chain(arguments.iter().cloned())
                .collect(),
            _ => self.derived_substitution_values(),
        }
    }

    /// Returns the values substituted into numbered message placeholders.
    ///
    /// An explicit override wins; otherwise the values come from the
    /// constraint parameters.
    #[must_use]
    pub fn substitution_values(&self) -> Vec<RuleParam> {
        self.substitution_values
            .clone()
            .unwrap_or_else(|| self.derived_substitution_values())
    }

    fn derived_substitution_values(&self) -> Vec<RuleParam> {
        match &self.constraint {
            Constraint::MinLength(bound) | Constraint::MaxLength(bound) => {
                vec![RuleParam::from(*bound)]
            }
            Constraint::Range { lo, hi } => vec![RuleParam::from(*lo), RuleParam::from(*hi)],
            Constraint::Pattern(pattern) => vec![RuleParam::Text(pattern.as_str().to_owned())],
            Constraint::Custom { arguments, .. } => arguments.clone(),
        }
    }
}

fn length_bound(kind: RuleKind, bound: &RuleParam) -> Result<usize, InvalidRuleError> {
    bound
        .as_length()
        .ok_or_else(|| InvalidRuleError::new(kind, format!("'{bound}' is not a valid length")))
}

fn numeric_bound(bound: &RuleParam) -> Result<Number, InvalidRuleError> {
    bound.as_number().ok_or_else(|| {
        InvalidRuleError::new(RuleKind::Range, format!("'{bound}' is not a number"))
    })
}

const fn expected_parameters(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::MinLength | RuleKind::MaxLength => "expected a single non-negative integer",
        RuleKind::Range => "expected exactly two numeric bounds",
        RuleKind::Pattern => "expected a single regular expression string",
        RuleKind::Custom => "expected a predicate identifier followed by optional arguments",
    }
}

/// Flat, serializable form of a [`ConstraintRule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Rule kind.
    pub kind: RuleKind,
    /// Ordered parameters.
    #[serde(default)]
    pub parameters: Vec<RuleParam>,
    /// Message key; the kind's default key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<MessageKey>,
    /// Values for numbered placeholders; derived from the parameters when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution_values: Option<Vec<RuleParam>>,
}

impl TryFrom<RuleDefinition> for ConstraintRule {
    type Error = InvalidRuleError;

    fn try_from(definition: RuleDefinition) -> Result<Self, Self::Error> {
        let mut rule = Self::from_parts(
            definition.kind,
            &definition.parameters,
            definition.message_key,
        )?;
        rule.substitution_values = definition.substitution_values;
        Ok(rule)
    }
}

impl From<ConstraintRule> for RuleDefinition {
    fn from(rule: ConstraintRule) -> Self {
        Self {
            kind: rule.kind(),
            parameters: rule.parameters(),
            message_key: Some(rule.message_key),
            substitution_values: rule.substitution_values,
        }
    }
}
