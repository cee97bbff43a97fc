//! Declarative rule types
//!
//! A [`FieldRule`] constrains one field; a [`CrossFieldRule`] relates two.
//! Both are plain data, assembled into a [`Schema`](crate::Schema).

use chrono::NaiveDate;
use regex::Regex;
use std::fmt;

use crate::error::ConfigurationError;
use crate::field::FieldName;
use crate::validators;

/// Format used for date coercion when none is given (`yyyy-MM-dd`)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Type coercion applied before bound checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coercion {
    /// Parse text into a calendar date using a chrono format string
    Date { format: String },
}

impl Coercion {
    pub fn date() -> Self {
        Coercion::Date {
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Upper bound for a coerced date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// The evaluation-time date supplied to `validate`
    Today,
    Fixed(NaiveDate),
}

impl DateBound {
    pub fn resolve(&self, now: NaiveDate) -> NaiveDate {
        match self {
            DateBound::Today => now,
            DateBound::Fixed(date) => *date,
        }
    }
}

/// A compiled regular expression that must match the entire raw value
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: validators::anchored(source)?,
        })
    }

    /// The built-in address pattern
    pub fn email() -> Self {
        Self {
            source: validators::EMAIL_PATTERN.to_string(),
            regex: validators::EMAIL_REGEX.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        validators::matches_pattern(value, &self.regex)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Constraints on a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: FieldName,
    pub required: bool,
    pub one_of: Option<Vec<String>>,
    pub coerce: Option<Coercion>,
    pub max_date: Option<DateBound>,
    pub pattern: Option<Pattern>,
    /// Replaces the default message for any failure on this field
    pub message: Option<String>,
}

impl FieldRule {
    /// A rule with no constraints
    pub fn new(field: FieldName) -> Self {
        Self {
            field,
            required: false,
            one_of: None,
            coerce: None,
            max_date: None,
            pattern: None,
            message: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    /// Coerce text to a date using `yyyy-MM-dd`
    pub fn date(self) -> Self {
        self.coerce(Coercion::date())
    }

    pub fn date_with_format(self, format: impl Into<String>) -> Self {
        self.coerce(Coercion::Date {
            format: format.into(),
        })
    }

    pub fn coerce(mut self, coercion: Coercion) -> Self {
        self.coerce = Some(coercion);
        self
    }

    pub fn max_date(mut self, bound: DateBound) -> Self {
        self.max_date = Some(bound);
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Result<Self, ConfigurationError> {
        let compiled = Pattern::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
            field: self.field,
            source,
        })?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    /// Require a well-formed email address
    pub fn email(mut self) -> Self {
        self.pattern = Some(Pattern::email());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Reason the rule contradicts itself, if it does
    pub(crate) fn conflict(&self) -> Option<&'static str> {
        if self.max_date.is_some() && self.coerce.is_none() {
            return Some("max_date requires date coercion");
        }
        if matches!(self.one_of, Some(ref allowed) if allowed.is_empty()) {
            return Some("one_of must list at least one value");
        }
        None
    }
}

/// A constraint relating two fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossFieldRule {
    /// `target` must hold the same value as `source`; errors land on `target`
    Matches {
        target: FieldName,
        source: FieldName,
        message: Option<String>,
    },
}

impl CrossFieldRule {
    pub fn matches(target: FieldName, source: FieldName) -> Self {
        CrossFieldRule::Matches {
            target,
            source,
            message: None,
        }
    }

    pub fn with_message(self, text: impl Into<String>) -> Self {
        match self {
            CrossFieldRule::Matches { target, source, .. } => CrossFieldRule::Matches {
                target,
                source,
                message: Some(text.into()),
            },
        }
    }

    /// Field that receives the error
    pub fn target(&self) -> FieldName {
        match self {
            CrossFieldRule::Matches { target, .. } => *target,
        }
    }

    /// All fields the rule reads
    pub fn fields(&self) -> [FieldName; 2] {
        match self {
            CrossFieldRule::Matches { target, source, .. } => [*target, *source],
        }
    }
}
