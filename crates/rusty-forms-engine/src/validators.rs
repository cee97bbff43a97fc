// File: src/validators.rs
// Purpose: Leaf checks used by the field validator

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::field::FieldValue;

/// Address syntax accepted by the signup form's email field
pub const EMAIL_PATTERN: &str = r#"(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))"#;

pub(crate) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| anchored(EMAIL_PATTERN).unwrap());

/// Compile `pattern` so that it must match the whole input
pub fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Missing values count as blank
pub fn is_blank(value: Option<&FieldValue>) -> bool {
    value.map_or(true, FieldValue::is_empty)
}

pub fn is_one_of(value: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|a| a == value)
}

/// Parse a date using a chrono format string.
///
/// Values that are already dates are returned unchanged.
pub fn coerce_date(value: &FieldValue, format: &str) -> Option<NaiveDate> {
    match value {
        FieldValue::Date(d) => Some(*d),
        FieldValue::Text(s) => NaiveDate::parse_from_str(s.trim(), format).ok(),
    }
}

/// Strictly later than the bound; equal dates are allowed
pub fn is_after(date: NaiveDate, bound: NaiveDate) -> bool {
    date > bound
}

pub fn matches_pattern(value: &str, regex: &Regex) -> bool {
    regex.is_match(value)
}
