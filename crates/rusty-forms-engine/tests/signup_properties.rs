//! Property tests for the signup schema over generated records.
//!
//! 1. Every well-formed record is valid, whatever the birthday up to today.
//! 2. Two different non-empty passwords flag `passwordConfirmation` only.
//! 3. Validating the same record twice gives the same result.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rusty_forms_engine::{
    signup, validate, FieldErrorKind, FieldName, FieldValue, Record, Schema,
};

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn schema() -> Schema {
    signup::schema()
}

// ── Strategies ──────────────────────────────────────────────────────────

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,12}"
}

fn password_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,16}"
}

fn email_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,10}(\\.[a-z0-9]{1,8})?@[a-z0-9]{1,10}\\.[a-z]{2,6}"
}

/// A birthday on or before `now()`, either as typed text or already parsed
fn birthday_strategy() -> impl Strategy<Value = FieldValue> {
    (0u64..=50_000, any::<bool>()).prop_map(|(days_back, parsed)| {
        let date = now().checked_sub_days(Days::new(days_back)).unwrap();
        if parsed {
            FieldValue::Date(date)
        } else {
            FieldValue::Text(date.format("%Y-%m-%d").to_string())
        }
    })
}

fn valid_record_strategy() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(signup::SALUTATIONS.to_vec()),
        name_strategy(),
        name_strategy(),
        prop::sample::select(signup::GENDERS.to_vec()),
        birthday_strategy(),
        email_strategy(),
        password_strategy(),
    )
        .prop_map(|(salutation, first, last, gender, birthday, email, password)| {
            Record::new()
                .with(FieldName::Salutation, salutation)
                .with(FieldName::FirstName, first)
                .with(FieldName::LastName, last)
                .with(FieldName::Gender, gender)
                .with(FieldName::Birthday, birthday)
                .with(FieldName::Email, email)
                .with(FieldName::Password, password.clone())
                .with(FieldName::PasswordConfirmation, password)
        })
}

/// Any text a user might type, biased towards values the rules care about
fn raw_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[ A-Za-z0-9@.\\-]{0,16}",
        prop::sample::select(vec!["Mr", "Ms", "female", "1900-01-01", "2999-12-31", "a@b.co"])
            .prop_map(str::to_string),
        any::<String>(),
    ]
}

fn arbitrary_record_strategy() -> impl Strategy<Value = Record> {
    prop::collection::vec(prop::option::of(raw_text_strategy()), FieldName::ALL.len()).prop_map(
        |values| {
            FieldName::ALL
                .into_iter()
                .zip(values)
                .filter_map(|(field, value)| value.map(|text| (field, FieldValue::from(text))))
                .collect()
        },
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Well-formed records are valid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn well_formed_record_is_valid(record in valid_record_strategy()) {
        let result = validate(&schema(), &record, now());
        prop_assert!(result.is_valid(), "unexpected errors {:?} for {:?}", result.messages(), record);
        prop_assert!(result.errors().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. A password mismatch is reported on the confirmation only
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mismatch_flags_only_confirmation(
        record in valid_record_strategy(),
        password in password_strategy(),
        confirmation in password_strategy(),
    ) {
        prop_assume!(password != confirmation);
        let record = record
            .with(FieldName::Password, password)
            .with(FieldName::PasswordConfirmation, confirmation);

        let result = validate(&schema(), &record, now());

        prop_assert!(!result.is_valid());
        prop_assert_eq!(result.error_count(), 1);
        prop_assert!(!result.has_error(FieldName::Password));
        let error = result.get_field_error(FieldName::PasswordConfirmation);
        prop_assert_eq!(
            error.map(|e| &e.kind),
            Some(&FieldErrorKind::Mismatch(FieldName::Password))
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Validation is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn validation_is_idempotent(record in arbitrary_record_strategy()) {
        let schema = schema();
        let first = validate(&schema, &record, now());
        let second = validate(&schema, &record, now());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn blank_fields_are_always_required(record in arbitrary_record_strategy()) {
        let result = validate(&schema(), &record, now());
        for field in FieldName::ALL {
            if record.is_blank(field) {
                prop_assert_eq!(result.get_error(field), Some("required"));
            }
        }
    }
}
