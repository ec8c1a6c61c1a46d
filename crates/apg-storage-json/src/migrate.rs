//! Versioned form-blob schema and its migration chain.
//!
//! Each step is a pure function over the raw JSON object that upgrades it by
//! exactly one version. Blobs without `schemaVersion` are treated as v1.

use apg_domain::{EDUCATION_YEARS_CHOICES, OTHER};
use serde_json::{Map, Value};

use crate::error::StorageError;

/// Version written by this build.
pub const FORM_SCHEMA_VERSION: u64 = 3;

pub const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

type Step = fn(&mut Map<String, Value>) -> Option<String>;

/// `STEPS[n]` upgrades a v(n+1) blob to v(n+2).
const STEPS: [Step; (FORM_SCHEMA_VERSION - 1) as usize] =
    [programs_from_legacy_program, years_choice_from_legacy_years];

/// A blob brought up to [`FORM_SCHEMA_VERSION`].
#[derive(Debug, Clone, PartialEq)]
pub struct Migrated {
    pub value: Value,
    /// Version found in storage before migrating.
    pub stored_version: u64,
    /// One note per migration that actually changed the blob.
    pub notes: Vec<String>,
}

/// Upgrades a stored form blob to the current schema.
pub fn migrate_form(mut value: Value) -> Result<Migrated, StorageError> {
    let object = value
        .as_object_mut()
        .ok_or_else(|| StorageError::Serde("stored form is not a JSON object".into()))?;

    let stored_version = object
        .get(SCHEMA_VERSION_FIELD)
        .and_then(Value::as_u64)
        .unwrap_or(1)
        .max(1);
    if stored_version > FORM_SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchema {
            found: stored_version,
            supported: FORM_SCHEMA_VERSION,
        });
    }

    let mut notes = Vec::new();
    for step in STEPS.iter().skip((stored_version - 1) as usize) {
        if let Some(note) = step(object) {
            notes.push(note);
        }
    }
    object.insert(SCHEMA_VERSION_FIELD.into(), Value::from(FORM_SCHEMA_VERSION));

    Ok(Migrated {
        value,
        stored_version,
        notes,
    })
}

/// v1 -> v2: single `program` string becomes the `programs` list.
fn programs_from_legacy_program(object: &mut Map<String, Value>) -> Option<String> {
    let legacy = object.remove("program");
    if object.get("programs").map_or(false, Value::is_array) {
        return None;
    }
    let program = legacy.as_ref().and_then(Value::as_str)?.trim();
    let programs = if program.is_empty() {
        Vec::new()
    } else {
        vec![Value::from(program)]
    };
    object.insert("programs".into(), Value::Array(programs));
    Some(format!("migrated legacy `program` \"{}\" to `programs`", program))
}

/// v2 -> v3: free-form `educationYears` becomes a choice plus optional
/// free text. Only the exact catalog tokens map to a choice.
fn years_choice_from_legacy_years(object: &mut Map<String, Value>) -> Option<String> {
    let legacy = object.remove("educationYears");
    if object.get("educationYearsChoice").map_or(false, Value::is_string) {
        return None;
    }
    let years = legacy.as_ref().and_then(Value::as_str)?.trim();
    let (choice, other) = if years.is_empty() {
        ("", "")
    } else if EDUCATION_YEARS_CHOICES
        .iter()
        .any(|token| *token != OTHER && *token == years)
    {
        (years, "")
    } else {
        (OTHER, years)
    };
    object.insert("educationYearsChoice".into(), Value::from(choice));
    object.insert("educationYearsOther".into(), Value::from(other));
    Some(format!(
        "migrated legacy `educationYears` \"{}\" to choice \"{}\"",
        years, choice
    ))
}
