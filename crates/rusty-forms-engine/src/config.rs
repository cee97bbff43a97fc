// File: src/config.rs
// Purpose: Schema declarations loaded from TOML files

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigurationError;
use crate::field::FieldName;
use crate::rules::{CrossFieldRule, DateBound, FieldRule, DEFAULT_DATE_FORMAT};
use crate::schema::{build_schema, Schema};
use crate::signup;

/// A schema as written in a TOML file
///
/// ```toml
/// [[fields]]
/// name = "birthday"
/// required = true
/// coerce = "date"
/// max_date = "today"
///
/// [[cross_fields]]
/// rule = "matches"
/// target = "passwordConfirmation"
/// source = "password"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub fields: Vec<FieldRuleConfig>,

    #[serde(default)]
    pub cross_fields: Vec<CrossFieldConfig>,
}

/// One `[[fields]]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldRuleConfig {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub one_of: Option<Vec<String>>,

    #[serde(default)]
    pub coerce: Option<CoerceConfig>,

    /// chrono format for date coercion (default: "%Y-%m-%d")
    #[serde(default)]
    pub date_format: Option<String>,

    /// "today" or a yyyy-MM-dd date
    #[serde(default)]
    pub max_date: Option<String>,

    /// Shorthand for the built-in address pattern
    #[serde(default)]
    pub email: bool,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoerceConfig {
    Date,
}

/// One `[[cross_fields]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CrossFieldConfig {
    Matches {
        target: String,
        source: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl FieldRuleConfig {
    fn into_rule(self) -> Result<FieldRule, ConfigurationError> {
        let field: FieldName = self.name.parse()?;
        let conflict = |reason: &str| ConfigurationError::ConflictingRule {
            field,
            reason: reason.to_string(),
        };

        let mut rule = FieldRule::new(field);
        if self.required {
            rule = rule.required();
        }
        if let Some(allowed) = self.one_of {
            rule = rule.one_of(allowed);
        }

        match (self.coerce, self.date_format) {
            (Some(CoerceConfig::Date), format) => {
                rule = rule.date_with_format(format.unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()));
            }
            (None, Some(_)) => return Err(conflict("date_format requires coerce = \"date\"")),
            (None, None) => {}
        }

        if let Some(bound) = self.max_date {
            rule = rule.max_date(parse_bound(&bound).ok_or_else(|| {
                conflict("max_date must be \"today\" or a yyyy-MM-dd date")
            })?);
        }

        rule = match (self.email, self.pattern) {
            (true, Some(_)) => return Err(conflict("email and pattern are mutually exclusive")),
            (true, None) => rule.email(),
            (false, Some(pattern)) => rule.pattern(&pattern)?,
            (false, None) => rule,
        };

        if let Some(message) = self.message {
            rule = rule.message(message);
        }

        Ok(rule)
    }
}

fn parse_bound(raw: &str) -> Option<DateBound> {
    if raw.eq_ignore_ascii_case("today") {
        return Some(DateBound::Today);
    }
    NaiveDate::parse_from_str(raw, DEFAULT_DATE_FORMAT)
        .ok()
        .map(DateBound::Fixed)
}

impl CrossFieldConfig {
    fn into_rule(self) -> Result<CrossFieldRule, ConfigurationError> {
        match self {
            CrossFieldConfig::Matches {
                target,
                source,
                message,
            } => {
                let rule = CrossFieldRule::matches(target.parse()?, source.parse()?);
                Ok(match message {
                    Some(text) => rule.with_message(text),
                    None => rule,
                })
            }
        }
    }
}

impl SchemaConfig {
    /// Parse a schema declaration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse schema declaration")
    }

    /// Read and parse a schema file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse schema file: {:?}", path))
    }

    /// Turn the declarations into a checked schema
    pub fn build(self) -> Result<Schema, ConfigurationError> {
        let field_rules = self
            .fields
            .into_iter()
            .map(FieldRuleConfig::into_rule)
            .collect::<Result<Vec<_>, _>>()?;
        let cross_field_rules = self
            .cross_fields
            .into_iter()
            .map(CrossFieldConfig::into_rule)
            .collect::<Result<Vec<_>, _>>()?;
        build_schema(field_rules, cross_field_rules)
    }
}

/// Load a schema from an implicit, conventional location
///
/// A missing or empty file yields the built-in signup schema. For a path the
/// user named, use [`SchemaConfig::from_file`] so a typo is an error.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(?path, "schema file not found, using signup schema");
        return Ok(signup::schema());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {:?}", path))?;

    if content.trim().is_empty() {
        return Ok(signup::schema());
    }

    let config: SchemaConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse schema file: {:?}", path))?;

    let schema = config
        .build()
        .with_context(|| format!("Invalid schema in {:?}", path))?;

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Coercion;
    use crate::validators::EMAIL_PATTERN;

    #[test]
    fn test_empty_config() {
        let config = SchemaConfig::parse("").unwrap();
        assert!(config.fields.is_empty());
        assert!(config.cross_fields.is_empty());
        assert_eq!(config.build().unwrap().field_rules().len(), 0);
    }

    #[test]
    fn test_field_table() {
        let toml = r#"
            [[fields]]
            name = "birthday"
            required = true
            coerce = "date"
            date_format = "%d.%m.%Y"
            max_date = "2000-01-01"
            message = "Enter your birthday"
        "#;
        let schema = SchemaConfig::parse(toml).unwrap().build().unwrap();
        let rule = schema.rule_for(FieldName::Birthday).unwrap();

        assert!(rule.required);
        assert_eq!(
            rule.coerce,
            Some(Coercion::Date {
                format: "%d.%m.%Y".to_string()
            })
        );
        assert_eq!(
            rule.max_date,
            Some(DateBound::Fixed(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()))
        );
        assert_eq!(rule.message.as_deref(), Some("Enter your birthday"));
    }

    #[test]
    fn test_email_shorthand() {
        let toml = r#"
            [[fields]]
            name = "email"
            email = true
        "#;
        let schema = SchemaConfig::parse(toml).unwrap().build().unwrap();
        let rule = schema.rule_for(FieldName::Email).unwrap();
        assert_eq!(rule.pattern.as_ref().map(|p| p.as_str()), Some(EMAIL_PATTERN));
    }

    #[test]
    fn test_unknown_field_name() {
        let toml = r#"
            [[fields]]
            name = "nickname"
        "#;
        let err = SchemaConfig::parse(toml).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownField(ref name) if name == "nickname"));
    }

    #[test]
    fn test_bad_max_date() {
        let toml = r#"
            [[fields]]
            name = "birthday"
            coerce = "date"
            max_date = "tomorrow"
        "#;
        let err = SchemaConfig::parse(toml).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigurationError::ConflictingRule { .. }));
    }

    #[test]
    fn test_date_format_without_coercion() {
        let toml = r#"
            [[fields]]
            name = "birthday"
            date_format = "%Y"
        "#;
        let err = SchemaConfig::parse(toml).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigurationError::ConflictingRule { .. }));
    }

    #[test]
    fn test_cross_field_table() {
        let toml = r#"
            [[fields]]
            name = "password"

            [[fields]]
            name = "passwordConfirmation"

            [[cross_fields]]
            rule = "matches"
            target = "passwordConfirmation"
            source = "password"
            message = "Passwords should match!"
        "#;
        let schema = SchemaConfig::parse(toml).unwrap().build().unwrap();
        assert_eq!(
            schema.cross_field_rules(),
            &[CrossFieldRule::matches(FieldName::PasswordConfirmation, FieldName::Password)
                .with_message("Passwords should match!")]
        );
    }

    #[test]
    fn test_unknown_cross_field_rule_kind_fails_to_parse() {
        let toml = r#"
            [[cross_fields]]
            rule = "differs"
            target = "email"
            source = "password"
        "#;
        assert!(SchemaConfig::parse(toml).is_err());
    }
}
