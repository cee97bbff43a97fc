// File: src/engine.rs
// Purpose: Field, cross-field and whole-record validation

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::field::{FieldValue, Record};
use crate::result::{FieldError, FieldErrorKind, ValidationResult};
use crate::rules::{Coercion, CrossFieldRule, FieldRule};
use crate::schema::Schema;
use crate::validators;

/// Evaluate one field rule against a raw value.
///
/// Checks run in order and the first failure wins: required, allowed set,
/// date coercion, date bound, pattern. A blank value on an optional field
/// passes without running the later checks.
pub fn validate_field(rule: &FieldRule, raw: Option<&FieldValue>, now: NaiveDate) -> Option<FieldError> {
    let fail = |kind| Some(FieldError::with_message(kind, rule.message.as_deref()));

    let value = match raw {
        Some(value) if !validators::is_blank(raw) => value,
        _ if rule.required => return fail(FieldErrorKind::Required),
        _ => return None,
    };
    let text = value.as_text();

    if let Some(allowed) = &rule.one_of {
        if !validators::is_one_of(&text, allowed) {
            return fail(FieldErrorKind::NotOneOf(allowed.clone()));
        }
    }

    let date = match &rule.coerce {
        Some(Coercion::Date { format }) => match validators::coerce_date(value, format) {
            Some(date) => Some(date),
            None => return fail(FieldErrorKind::InvalidDate),
        },
        None => None,
    };

    if let (Some(bound), Some(date)) = (rule.max_date, date) {
        if validators::is_after(date, bound.resolve(now)) {
            return fail(FieldErrorKind::InFuture);
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(&text) {
            return fail(FieldErrorKind::InvalidFormat);
        }
    }

    None
}

/// Evaluate a rule spanning several fields.
///
/// Missing values compare as empty text, so two blank fields match; the
/// field rules report blanks on their own.
pub fn validate_cross_field(rule: &CrossFieldRule, record: &Record) -> Option<FieldError> {
    match rule {
        CrossFieldRule::Matches {
            target,
            source,
            message,
        } => {
            let text_of = |field| record.get(field).map(|v| v.as_text()).unwrap_or_default();
            if text_of(*target) == text_of(*source) {
                None
            } else {
                Some(FieldError::with_message(
                    FieldErrorKind::Mismatch(*source),
                    message.as_deref(),
                ))
            }
        }
    }
}

/// Validate a whole record.
///
/// Every field rule yields at most one error. A cross-field error is kept
/// only when its target field has no field-level error.
pub fn validate(schema: &Schema, record: &Record, now: NaiveDate) -> ValidationResult {
    let mut errors = BTreeMap::new();

    for rule in schema.field_rules() {
        if let Some(error) = validate_field(rule, record.get(rule.field), now) {
            errors.insert(rule.field, error);
        }
    }

    for rule in schema.cross_field_rules() {
        if let Some(error) = validate_cross_field(rule, record) {
            errors.entry(rule.target()).or_insert(error);
        }
    }

    let required_filled = schema.required_fields().all(|field| !record.is_blank(field));
    let result = ValidationResult::new(errors, required_filled);

    tracing::debug!(
        fields = schema.field_rules().len(),
        errors = result.error_count(),
        valid = result.is_valid(),
        %now,
        "record validated"
    );

    result
}

/// A schema paired with the clock that supplies "today"
#[derive(Debug, Clone)]
pub struct ValidationEngine<C = SystemClock> {
    schema: Arc<Schema>,
    clock: C,
}

impl ValidationEngine<SystemClock> {
    pub fn with_system_clock(schema: impl Into<Arc<Schema>>) -> Self {
        Self::new(schema, SystemClock)
    }
}

impl<C: Clock> ValidationEngine<C> {
    pub fn new(schema: impl Into<Arc<Schema>>, clock: C) -> Self {
        Self {
            schema: schema.into(),
            clock,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validate against the clock's current date
    pub fn validate(&self, record: &Record) -> ValidationResult {
        self.validate_at(record, self.clock.today())
    }

    pub fn validate_at(&self, record: &Record, now: NaiveDate) -> ValidationResult {
        validate(&self.schema, record, now)
    }
}
