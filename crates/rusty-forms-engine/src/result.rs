// File: src/result.rs
// Purpose: Per-field errors and the outcome of a validation pass

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::field::FieldName;

/// Which check rejected a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    NotOneOf(Vec<String>),
    InvalidDate,
    InFuture,
    InvalidFormat,
    Mismatch(FieldName),
}

impl FieldErrorKind {
    pub fn default_message(&self) -> String {
        match self {
            FieldErrorKind::Required => "required".to_string(),
            FieldErrorKind::NotOneOf(allowed) => format!("must be one of {}", allowed.join(", ")),
            FieldErrorKind::InvalidDate => "invalid date".to_string(),
            FieldErrorKind::InFuture => "must not be in the future".to_string(),
            FieldErrorKind::InvalidFormat => "invalid format".to_string(),
            FieldErrorKind::Mismatch(source) => format!("must match {}", source),
        }
    }
}

/// An expected, recoverable validation failure on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: FieldErrorKind) -> Self {
        let message = kind.default_message();
        Self { kind, message }
    }

    /// Use `custom` as the message when present
    pub fn with_message(kind: FieldErrorKind, custom: Option<&str>) -> Self {
        match custom {
            Some(text) => Self {
                kind,
                message: text.to_string(),
            },
            None => Self::new(kind),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of validating a record against a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    errors: BTreeMap<FieldName, FieldError>,
}

impl ValidationResult {
    pub(crate) fn new(errors: BTreeMap<FieldName, FieldError>, required_filled: bool) -> Self {
        Self {
            is_valid: errors.is_empty() && required_filled,
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_error(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    /// Get the error message for a specific field
    pub fn get_error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(|e| e.message.as_str())
    }

    pub fn get_field_error(&self, field: FieldName) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &BTreeMap<FieldName, FieldError> {
        &self.errors
    }

    /// Field name to message, the shape a form displays
    pub fn messages(&self) -> BTreeMap<FieldName, &str> {
        self.errors
            .iter()
            .map(|(field, error)| (*field, error.message.as_str()))
            .collect()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("isValid", &self.is_valid)?;
        state.serialize_field("errors", &self.messages())?;
        state.end()
    }
}
