//! The signup form: its schema and the records it starts from

use crate::clock::Clock;
use crate::engine::ValidationEngine;
use crate::field::{FieldName, FieldValue, Record};
use crate::form::Form;
use crate::rules::{CrossFieldRule, DateBound, FieldRule};
use crate::schema::Schema;

pub const SALUTATIONS: [&str; 3] = ["Mr", "Mrs", "Ms"];
pub const GENDERS: [&str; 2] = ["male", "female"];

/// Field rules in form order
pub fn field_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new(FieldName::Salutation)
            .required()
            .one_of(SALUTATIONS),
        FieldRule::new(FieldName::FirstName).required(),
        FieldRule::new(FieldName::LastName).required(),
        FieldRule::new(FieldName::Gender).required().one_of(GENDERS),
        FieldRule::new(FieldName::Birthday)
            .required()
            .date()
            .max_date(DateBound::Today),
        FieldRule::new(FieldName::Email).required().email(),
        FieldRule::new(FieldName::Password).required(),
        FieldRule::new(FieldName::PasswordConfirmation).required(),
    ]
}

pub fn cross_field_rules() -> Vec<CrossFieldRule> {
    vec![CrossFieldRule::matches(
        FieldName::PasswordConfirmation,
        FieldName::Password,
    )]
}

pub fn schema() -> Schema {
    Schema::from_trusted_rules(field_rules(), cross_field_rules())
}

/// Every field present and empty, as a fresh form starts
pub fn blank_record() -> Record {
    FieldName::ALL
        .into_iter()
        .map(|field| (field, FieldValue::default()))
        .collect()
}

/// A blank signup form validated against `clock`
pub fn form<C: Clock>(clock: C) -> Form<C> {
    Form::new(ValidationEngine::new(schema(), clock), blank_record())
}

/// A complete, valid set of sample values
pub fn sample_record() -> Record {
    Record::new()
        .with(FieldName::Salutation, "Mr")
        .with(FieldName::FirstName, "John")
        .with(FieldName::LastName, "Doe")
        .with(FieldName::Gender, "male")
        .with(FieldName::Birthday, "1900-01-01")
        .with(FieldName::Email, "john.doe@admin.com")
        .with(FieldName::Password, "Test1234")
        .with(FieldName::PasswordConfirmation, "Test1234")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::build_schema;

    #[test]
    fn test_signup_rules_pass_schema_checks() {
        let checked = build_schema(field_rules(), cross_field_rules()).unwrap();
        assert_eq!(checked, schema());
    }

    #[test]
    fn test_every_field_is_required() {
        let required: Vec<_> = schema().required_fields().collect();
        assert_eq!(required, FieldName::ALL.to_vec());
    }

    #[test]
    fn test_blank_record_has_every_field() {
        let record = blank_record();
        assert_eq!(record.len(), FieldName::ALL.len());
        assert!(FieldName::ALL.iter().all(|f| record.is_blank(*f)));
    }

    #[test]
    fn test_sample_record_birthday() {
        assert_eq!(
            sample_record().get(FieldName::Birthday),
            Some(&FieldValue::from("1900-01-01"))
        );
    }
}
