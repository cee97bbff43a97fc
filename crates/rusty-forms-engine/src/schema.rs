// File: src/schema.rs
// Purpose: Immutable schema assembled from field and cross-field rules

use std::collections::BTreeSet;

use crate::error::ConfigurationError;
use crate::field::FieldName;
use crate::rules::{CrossFieldRule, FieldRule};

/// The validation rules for one form, fixed once built
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    field_rules: Vec<FieldRule>,
    cross_field_rules: Vec<CrossFieldRule>,
}

/// Build a schema, rejecting inconsistent declarations
///
/// Fails when a field is declared twice, when a field rule contradicts itself,
/// or when a cross-field rule names a field without a field rule or relates a
/// field to itself.
pub fn build_schema(
    field_rules: Vec<FieldRule>,
    cross_field_rules: Vec<CrossFieldRule>,
) -> Result<Schema, ConfigurationError> {
    let mut declared = BTreeSet::new();
    for rule in &field_rules {
        if !declared.insert(rule.field) {
            return Err(ConfigurationError::DuplicateField(rule.field));
        }
        if let Some(reason) = rule.conflict() {
            return Err(ConfigurationError::ConflictingRule {
                field: rule.field,
                reason: reason.to_string(),
            });
        }
    }

    for rule in &cross_field_rules {
        let [target, source] = rule.fields();
        if target == source {
            return Err(ConfigurationError::SelfReference(target));
        }
        if let Some(missing) = rule.fields().into_iter().find(|f| !declared.contains(f)) {
            return Err(ConfigurationError::UndeclaredField(missing));
        }
    }

    tracing::debug!(
        fields = field_rules.len(),
        cross_fields = cross_field_rules.len(),
        "schema built"
    );

    Ok(Schema {
        field_rules,
        cross_field_rules,
    })
}

impl Schema {
    /// Skips the consistency checks; only for rule sets covered by tests
    pub(crate) fn from_trusted_rules(
        field_rules: Vec<FieldRule>,
        cross_field_rules: Vec<CrossFieldRule>,
    ) -> Self {
        Self {
            field_rules,
            cross_field_rules,
        }
    }

    /// Same as [`build_schema`]
    pub fn new(
        field_rules: Vec<FieldRule>,
        cross_field_rules: Vec<CrossFieldRule>,
    ) -> Result<Self, ConfigurationError> {
        build_schema(field_rules, cross_field_rules)
    }

    /// Field rules in declaration order
    pub fn field_rules(&self) -> &[FieldRule] {
        &self.field_rules
    }

    pub fn cross_field_rules(&self) -> &[CrossFieldRule] {
        &self.cross_field_rules
    }

    pub fn rule_for(&self, field: FieldName) -> Option<&FieldRule> {
        self.field_rules.iter().find(|r| r.field == field)
    }

    pub fn declares(&self, field: FieldName) -> bool {
        self.rule_for(field).is_some()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.field_rules
            .iter()
            .filter(|r| r.required)
            .map(|r| r.field)
    }
}
