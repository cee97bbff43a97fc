// File: src/error.rs
// Purpose: Errors raised while building a schema

use crate::field::FieldName;

/// A schema definition that is internally inconsistent.
///
/// Only schema construction can fail. Invalid user input is never an `Err`;
/// it is reported as a [`FieldError`](crate::FieldError) inside a
/// [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown field name: {0:?}")]
    UnknownField(String),

    #[error("cross-field rule references field `{0}` which has no field rule")]
    UndeclaredField(FieldName),

    #[error("field `{0}` is declared more than once")]
    DuplicateField(FieldName),

    #[error("cross-field rule relates field `{0}` to itself")]
    SelfReference(FieldName),

    #[error("conflicting rule on field `{field}`: {reason}")]
    ConflictingRule { field: FieldName, reason: String },

    #[error("invalid pattern on field `{field}`: {source}")]
    InvalidPattern {
        field: FieldName,
        #[source]
        source: regex::Error,
    },
}
