//! Database error type and constraint classification
//!
//! Postgres reports constraint failures by SQLSTATE. They are mapped onto
//! client-facing errors with the resource's own messages; anything else
//! stays an opaque [`DbError::Sqlx`].

use crate::models::{ContractState, ResourceSpec, ValidationError};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{message}")]
    NotFound { resource: &'static str, message: String },

    /// A referenced row does not exist
    #[error("{message}")]
    ReferenceNotFound { field: &'static str, message: String },

    /// A uniqueness rule was violated
    #[error("{message}")]
    Conflict { message: &'static str },

    /// Dependent rows block a delete
    #[error("{message}")]
    InUse { message: &'static str },

    /// Rejected by a CHECK, NOT NULL or consistency rule
    #[error("{0}")]
    Invalid(ValidationError),

    #[error("transição de status não permitida: {from} -> {to}")]
    InvalidTransition {
        from: ContractState,
        to: ContractState,
    },
}

impl DbError {
    pub fn not_found(spec: &ResourceSpec) -> Self {
        Self::NotFound {
            resource: spec.table,
            message: spec.noun.not_found(),
        }
    }
}

/// Constraint class by SQLSTATE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// 23505
    Unique,
    /// 23503
    ForeignKey,
    /// 23514
    Check,
    /// 23502
    NotNull,
}

impl Violation {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "23505" => Some(Self::Unique),
            "23503" => Some(Self::ForeignKey),
            "23514" => Some(Self::Check),
            "23502" => Some(Self::NotNull),
            _ => None,
        }
    }
}

/// Classify a driver error, returning the violated constraint's name.
fn classify(err: &sqlx::Error) -> Option<(Violation, Option<String>)> {
    let db = err.as_database_error()?;
    let violation = Violation::from_code(db.code()?.as_ref())?;
    Some((violation, db.constraint().map(str::to_owned)))
}

/// Map a failed INSERT or UPDATE.
pub fn write_error(spec: &'static ResourceSpec, err: sqlx::Error) -> DbError {
    let Some((violation, constraint)) = classify(&err) else {
        return DbError::Sqlx(err);
    };
    let constraint = constraint.as_deref();
    match violation {
        Violation::Unique => DbError::Conflict {
            message: spec.conflict_for(constraint),
        },
        Violation::ForeignKey => match spec.reference_for(constraint) {
            Some(field) => DbError::ReferenceNotFound {
                field: field.name,
                message: field
                    .references
                    .map(|target| target.noun.not_found())
                    .unwrap_or_else(|| "Registro relacionado não encontrado".to_owned()),
            },
            None => DbError::ReferenceNotFound {
                field: "",
                message: "Registro relacionado não encontrado".to_owned(),
            },
        },
        Violation::Check => DbError::Invalid(ValidationError::InvalidFormat {
            field: constraint_field(spec, constraint),
            reason: "valor rejeitado pelo banco de dados",
        }),
        Violation::NotNull => DbError::Invalid(ValidationError::Empty {
            field: constraint_field(spec, constraint),
        }),
    }
}

/// Map a failed DELETE. A foreign-key failure here means dependents
/// appeared after the pre-check.
pub fn delete_error(spec: &'static ResourceSpec, err: sqlx::Error) -> DbError {
    match classify(&err) {
        Some((Violation::ForeignKey, _)) => DbError::InUse {
            message: spec.in_use_message,
        },
        _ => DbError::Sqlx(err),
    }
}

fn constraint_field(spec: &ResourceSpec, constraint: Option<&str>) -> &'static str {
    constraint
        .and_then(|name| spec.fields.iter().find(|f| name.contains(f.column)))
        .map(|f| f.name)
        .unwrap_or(spec.table)
}
