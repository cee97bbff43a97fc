// File: src/commands.rs
// Purpose: Subcommand implementations; each returns whether the input passed

use anyhow::{Context, Result};
use rusty_forms_engine::{
    signup, Clock, Form, Record, Schema, SchemaConfig, SubmitOutcome, ValidationEngine,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Schema from `--schema`, or the signup schema when none is given
///
/// A path named on the command line must exist and hold a valid schema.
pub fn schema(path: Option<&Path>) -> Result<Schema> {
    match path {
        Some(path) => load_explicit_schema(path),
        None => Ok(signup::schema()),
    }
}

fn load_explicit_schema(path: &Path) -> Result<Schema> {
    let schema = SchemaConfig::from_file(path)?
        .build()
        .with_context(|| format!("Invalid schema in {:?}", path))?;
    tracing::debug!(?path, fields = schema.field_rules().len(), "schema loaded");
    Ok(schema)
}

/// Read a JSON record from a file, or stdin when `input` is "-"
pub fn read_record(input: &str) -> Result<Record> {
    let content = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read record from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read record file: {:?}", input))?
    };

    serde_json::from_str(&content).with_context(|| format!("Failed to parse record: {:?}", input))
}

pub fn validate<C: Clock>(schema: Schema, clock: C, input: &str, out: &mut impl Write) -> Result<bool> {
    let record = read_record(input)?;
    let result = ValidationEngine::new(schema, clock).validate(&record);

    serde_json::to_writer_pretty(&mut *out, &result)?;
    writeln!(out)?;
    Ok(result.is_valid())
}

pub fn submit<C: Clock>(schema: Schema, clock: C, input: &str, out: &mut impl Write) -> Result<bool> {
    let record = read_record(input)?;
    let mut form = Form::new(ValidationEngine::new(schema, clock), signup::blank_record());
    form.fill(record);

    let mut written = Ok(());
    let outcome = form.submit(|data| {
        written = serde_json::to_writer(&mut *out, data).map_err(anyhow::Error::from);
    });
    written?;

    match outcome {
        SubmitOutcome::Submitted(_) => {
            writeln!(out)?;
            Ok(true)
        }
        SubmitOutcome::Rejected(result) => {
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
            Ok(false)
        }
    }
}

pub fn defaults(out: &mut impl Write) -> Result<bool> {
    serde_json::to_writer_pretty(&mut *out, &signup::sample_record())?;
    writeln!(out)?;
    Ok(true)
}

pub fn check_schema(path: &Path, out: &mut impl Write) -> Result<bool> {
    let schema = load_explicit_schema(path)?;

    writeln!(
        out,
        "{:?}: {} field rule(s), {} cross-field rule(s)",
        path,
        schema.field_rules().len(),
        schema.cross_field_rules().len()
    )?;
    Ok(true)
}
