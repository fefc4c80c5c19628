//! Validation error types

use std::fmt;

/// Validation error for request payloads, path ids and query filters
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more required fields are absent or blank
    Missing {
        fields: Vec<&'static str>,
        message: &'static str,
    },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field is shorter than allowed
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field has the wrong JSON type
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// String doesn't match required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Field failed with a resource-specific message
    Rejected {
        field: &'static str,
        message: &'static str,
    },

    /// Two values disagree (street vs postal code, breed vs species, dates)
    Inconsistent { message: &'static str },

    /// Update payload carried nothing writable
    NoUpdatableFields,

    /// Body is not a JSON object
    MalformedBody { reason: String },

    /// Query string could not be decoded
    MalformedQuery { reason: String },
}

impl ValidationError {
    /// Fields the error points at, when it can name them.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::Missing { fields, .. } => fields.clone(),
            Self::Empty { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::WrongType { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::InvalidVariant { field, .. }
            | Self::Rejected { field, .. } => vec![field],
            Self::Inconsistent { .. }
            | Self::NoUpdatableFields
            | Self::MalformedBody { .. }
            | Self::MalformedQuery { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { message, .. } => write!(f, "{}", message),
            Self::Empty { field } => write!(f, "{} não pode ser vazio", field),
            Self::TooShort { field, min } => {
                write!(f, "{} deve ter pelo menos {} caracteres", field, min)
            }
            Self::TooLong { field, max } => {
                write!(f, "{} deve ter no máximo {} caracteres", field, max)
            }
            Self::WrongType { field, expected } => write!(f, "{} deve ser {}", field, expected),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "valor inválido para {}: '{}'", field, value)
            }
            Self::Rejected { message, .. } | Self::Inconsistent { message } => {
                write!(f, "{}", message)
            }
            Self::NoUpdatableFields => {
                write!(f, "Nenhum campo válido para atualização fornecido")
            }
            Self::MalformedBody { reason } => write!(f, "corpo da requisição inválido: {}", reason),
            Self::MalformedQuery { reason } => write!(f, "parâmetros de consulta inválidos: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
