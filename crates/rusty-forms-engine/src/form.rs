// File: src/form.rs
// Purpose: State of one form instance: current values, reset and submit

use std::mem;

use crate::clock::{Clock, SystemClock};
use crate::engine::ValidationEngine;
use crate::field::{FieldName, FieldValue, Record};
use crate::result::ValidationResult;

/// When edits trigger validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Re-validate after every edit
    #[default]
    OnChange,
    /// Validate only when submitting
    OnSubmit,
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed; carries the submitted values
    Submitted(Record),
    /// Validation failed; the form keeps its values
    Rejected(ValidationResult),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }

    /// Extract the submitted record if validation passed
    pub fn submitted(self) -> Option<Record> {
        match self {
            SubmitOutcome::Submitted(record) => Some(record),
            SubmitOutcome::Rejected(_) => None,
        }
    }

    /// Extract the validation result if validation failed
    pub fn rejected(self) -> Option<ValidationResult> {
        match self {
            SubmitOutcome::Submitted(_) => None,
            SubmitOutcome::Rejected(result) => Some(result),
        }
    }
}

/// One form instance
///
/// Holds the record being edited and the defaults it resets to. Results are
/// recomputed on every request, never cached.
#[derive(Debug, Clone)]
pub struct Form<C = SystemClock> {
    engine: ValidationEngine<C>,
    mode: ValidationMode,
    defaults: Record,
    record: Record,
}

impl<C: Clock> Form<C> {
    pub fn new(engine: ValidationEngine<C>, defaults: Record) -> Self {
        Self {
            engine,
            mode: ValidationMode::default(),
            record: defaults.clone(),
            defaults,
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn engine(&self) -> &ValidationEngine<C> {
        &self.engine
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn value(&self, field: FieldName) -> Option<&FieldValue> {
        self.record.get(field)
    }

    /// Record an edit; in `OnChange` mode returns the fresh result
    pub fn set_value(&mut self, field: FieldName, value: impl Into<FieldValue>) -> Option<ValidationResult> {
        self.record.set(field, value);
        self.on_change()
    }

    /// Overwrite several fields at once, validating once afterwards
    pub fn fill(&mut self, values: Record) -> Option<ValidationResult> {
        for (field, value) in values.iter() {
            self.record.set(field, value.clone());
        }
        self.on_change()
    }

    /// Restore the default values
    pub fn reset(&mut self) {
        self.record = self.defaults.clone();
        tracing::info!("form reset");
    }

    pub fn validate(&self) -> ValidationResult {
        self.engine.validate(&self.record)
    }

    /// Validate and, when valid, hand the values to `on_submit` and reset.
    pub fn submit<F>(&mut self, on_submit: F) -> SubmitOutcome
    where
        F: FnOnce(&Record),
    {
        let result = self.validate();
        if !result.is_valid() {
            tracing::info!(errors = result.error_count(), "form submission rejected");
            return SubmitOutcome::Rejected(result);
        }

        let record = mem::replace(&mut self.record, self.defaults.clone());
        on_submit(&record);
        tracing::info!(fields = record.len(), "form submitted");
        SubmitOutcome::Submitted(record)
    }

    fn on_change(&self) -> Option<ValidationResult> {
        match self.mode {
            ValidationMode::OnChange => Some(self.validate()),
            ValidationMode::OnSubmit => None,
        }
    }
}
