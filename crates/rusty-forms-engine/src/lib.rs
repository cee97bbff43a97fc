//! Rusty-Forms Engine
//!
//! Declarative form validation. A [`Schema`] of field rules and cross-field
//! rules is built once; [`validate`] applies it to a [`Record`] of raw values
//! and reports per-field errors in a [`ValidationResult`].
//!
//! Invalid input is data, not an error: only building a schema can fail, with
//! a [`ConfigurationError`]. The date that bounds `max_date` rules is passed
//! in explicitly, or read once per pass from an injected [`Clock`].
//!
//! ```
//! use chrono::NaiveDate;
//! use rusty_forms_engine::{signup, validate, FieldName};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let record = signup::sample_record().with(FieldName::PasswordConfirmation, "Other");
//! let result = validate(&signup::schema(), &record, now);
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.get_error(FieldName::PasswordConfirmation), Some("must match password"));
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod form;
pub mod result;
pub mod rules;
pub mod schema;
pub mod signup;
pub mod validators;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_schema, SchemaConfig};
pub use engine::{validate, validate_cross_field, validate_field, ValidationEngine};
pub use error::ConfigurationError;
pub use field::{FieldName, FieldValue, Record};
pub use form::{Form, SubmitOutcome, ValidationMode};
pub use result::{FieldError, FieldErrorKind, ValidationResult};
pub use rules::{Coercion, CrossFieldRule, DateBound, FieldRule, Pattern};
pub use schema::{build_schema, Schema};
