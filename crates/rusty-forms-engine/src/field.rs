// File: src/field.rs
// Purpose: Field names, raw field values and the per-form record

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// The fields a signup form can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Salutation,
    FirstName,
    LastName,
    Gender,
    Birthday,
    Email,
    Password,
    PasswordConfirmation,
}

impl FieldName {
    /// Every field, in declaration order
    pub const ALL: [FieldName; 8] = [
        FieldName::Salutation,
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Gender,
        FieldName::Birthday,
        FieldName::Email,
        FieldName::Password,
        FieldName::PasswordConfirmation,
    ];

    /// Name used on the wire and in schema files
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Salutation => "salutation",
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Gender => "gender",
            FieldName::Birthday => "birthday",
            FieldName::Email => "email",
            FieldName::Password => "password",
            FieldName::PasswordConfirmation => "passwordConfirmation",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownField(s.to_string()))
    }
}

/// A raw value as entered into a form
///
/// Inputs produce text. A date that has already been coerced can be stored
/// as-is; coercion leaves it untouched. A `null` on the wire reads as empty
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Date(NaiveDate),
        }

        Ok(match Option::<Wire>::deserialize(deserializer)? {
            Some(Wire::Text(s)) => FieldValue::Text(s),
            Some(Wire::Date(d)) => FieldValue::Date(d),
            None => FieldValue::default(),
        })
    }
}

impl FieldValue {
    /// True for text that is empty once surrounding whitespace is removed
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Date(_) => false,
        }
    }

    /// Text form of the value; dates render as `yyyy-MM-dd`
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

/// Current values of one form instance
///
/// A field with no entry reads as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<FieldName, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`
    pub fn with(mut self, field: FieldName, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, returning the previous value if any
    pub fn set(&mut self, field: FieldName, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(field, value.into())
    }

    pub fn get(&self, field: FieldName) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn remove(&mut self, field: FieldName) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Missing or empty
    pub fn is_blank(&self, field: FieldName) -> bool {
        self.get(field).map_or(true, FieldValue::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(FieldName, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (FieldName, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_round_trips_through_wire_name() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_name() {
        let err = "nickname".parse::<FieldName>().unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownField(ref name) if name == "nickname"));
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        assert!(FieldValue::from("   ").is_empty());
        assert!(!FieldValue::from(" x ").is_empty());
        assert!(!FieldValue::from(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()).is_empty());
    }

    #[test]
    fn test_missing_field_is_blank() {
        let record = Record::new().with(FieldName::FirstName, "John");
        assert!(!record.is_blank(FieldName::FirstName));
        assert!(record.is_blank(FieldName::LastName));
    }

    #[test]
    fn test_record_serializes_with_wire_names() {
        let record = Record::new()
            .with(FieldName::PasswordConfirmation, "secret")
            .with(FieldName::Birthday, NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"birthday":"1900-01-01","passwordConfirmation":"secret"}"#);
    }

    #[test]
    fn test_record_deserializes_strings_as_text() {
        let record: Record = serde_json::from_str(r#"{"birthday":"1900-01-01"}"#).unwrap();
        assert_eq!(
            record.get(FieldName::Birthday),
            Some(&FieldValue::Text("1900-01-01".to_string()))
        );
    }

    #[test]
    fn test_null_value_reads_as_empty_text() {
        let record: Record =
            serde_json::from_str(r#"{"firstName":null,"lastName":"Doe"}"#).unwrap();
        assert_eq!(record.get(FieldName::FirstName), Some(&FieldValue::default()));
        assert!(record.is_blank(FieldName::FirstName));
        assert!(!record.is_blank(FieldName::LastName));
    }

    #[test]
    fn test_non_text_value_is_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"firstName":42}"#).is_err());
    }
}
