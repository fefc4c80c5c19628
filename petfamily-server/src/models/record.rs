//! Payload validation into typed column values
//!
//! Validation is pure: it runs before any database access, so malformed
//! requests never open a transaction.

use serde_json::{Map, Value};

use super::field::{is_blank, SqlValue};
use super::resource::{Field, ResourceSpec};
use super::ValidationError;

/// Validated column values, in field declaration order
#[derive(Debug, Default)]
pub struct Record {
    values: Vec<(&'static Field, SqlValue)>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.values
            .iter()
            .find(|(field, _)| field.name == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static Field, SqlValue)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn push(&mut self, field: &'static Field, value: SqlValue) {
        self.values.push((field, value));
    }
}

/// Validate a create payload.
///
/// Required fields must be present and non-blank. Blank optional fields
/// are left out so the column default applies. Unknown keys are ignored.
///
/// # Errors
///
/// [`ValidationError::Missing`] lists every missing required field with the
/// resource's message. Other variants report the first malformed field.
pub fn validate_create(
    spec: &'static ResourceSpec,
    payload: &Map<String, Value>,
) -> Result<Record, ValidationError> {
    let missing: Vec<&'static str> = spec
        .fields
        .iter()
        .filter(|f| f.required && is_blank(payload.get(f.name)))
        .map(|f| f.name)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::Missing {
            fields: missing,
            message: spec.required_message,
        });
    }

    let mut record = Record::default();
    for field in spec.fields {
        let value = payload.get(field.name);
        if !is_blank(value) {
            if let Some(value) = value {
                record.push(field, field.parse(value)?);
            }
        }
    }
    Ok(record)
}

/// Validate a partial update payload.
///
/// Only supplied fields are kept. A blank value clears an optional column
/// and is rejected for a required one.
///
/// # Errors
///
/// [`ValidationError::NoUpdatableFields`] when no known field was supplied.
pub fn validate_update(
    spec: &'static ResourceSpec,
    payload: &Map<String, Value>,
) -> Result<Record, ValidationError> {
    let mut record = Record::default();
    for field in spec.fields {
        let Some(value) = payload.get(field.name) else {
            continue;
        };
        if is_blank(Some(value)) {
            if field.required {
                return Err(ValidationError::Empty { field: field.name });
            }
            record.push(field, field.kind.null());
        } else {
            record.push(field, field.parse(value)?);
        }
    }

    if record.is_empty() {
        return Err(ValidationError::NoUpdatableFields);
    }
    Ok(record)
}
