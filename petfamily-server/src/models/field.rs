//! Field kinds and the typed values they normalize into
//!
//! Every writable column is declared with a [`FieldKind`]. Parsing a JSON
//! value through its kind yields a [`SqlValue`] that binds with the right
//! Postgres type, NULLs included.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::ValidationError;

/// Postal code, `XXXXX-XXX`. Matches the `cep.codigo` CHECK constraint.
static CEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}-\d{3}$").expect("invalid CEP regex"));

static STATE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("invalid state code regex"));

/// CPF with optional punctuation: `123.456.789-09` or `12345678909`
static CPF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{3}\.?\d{3}\.?\d{3}-?\d{2}$").expect("invalid CPF regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

/// Phone: digits with optional `()`, `-`, spaces and `+`
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s()+-]+$").expect("invalid phone regex"));

/// How a field's JSON value is checked and normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed text with a character-count window
    Text { min: usize, max: usize },
    /// Two-letter state code, stored uppercase
    StateCode,
    /// Brazilian postal code
    PostalCode,
    /// CPF, stored as 11 digits
    Cpf,
    Email,
    /// Phone number, stored as 10 or 11 digits
    Phone,
    /// Write-only text
    Secret { min: usize },
    /// One of a fixed set of uppercase codes
    Choice(&'static [&'static str]),
    /// Non-negative integer
    Count,
    /// Non-negative amount
    Money,
    Flag,
    /// Calendar date, `YYYY-MM-DD`
    Date { allow_future: bool },
    /// Positive row id
    Id,
}

/// Normalized value ready to bind
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Money(Option<f64>),
    Bool(Option<bool>),
    Date(Option<NaiveDate>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            Self::Text(v) => v.is_none(),
            Self::Int(v) => v.is_none(),
            Self::Money(v) => v.is_none(),
            Self::Bool(v) => v.is_none(),
            Self::Date(v) => v.is_none(),
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => *v,
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => *v,
            _ => None,
        }
    }
}

impl FieldKind {
    /// Typed NULL for this kind.
    pub fn null(&self) -> SqlValue {
        match self {
            Self::Count | Self::Id => SqlValue::Int(None),
            Self::Money => SqlValue::Money(None),
            Self::Flag => SqlValue::Bool(None),
            Self::Date { .. } => SqlValue::Date(None),
            _ => SqlValue::Text(None),
        }
    }

    /// Parse a non-null JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming `field` when the value has the
    /// wrong type or fails the kind's format rules.
    pub fn parse(&self, field: &'static str, value: &Value) -> Result<SqlValue, ValidationError> {
        match *self {
            Self::Text { min, max } => {
                let s = text(field, value)?;
                let len = s.chars().count();
                if len < min {
                    return Err(ValidationError::TooShort { field, min });
                }
                if len > max {
                    return Err(ValidationError::TooLong { field, max });
                }
                Ok(SqlValue::Text(Some(s.to_owned())))
            }
            Self::StateCode => {
                let s = text(field, value)?;
                if !STATE_CODE_RE.is_match(s) {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "deve ter exatamente 2 letras",
                    });
                }
                Ok(SqlValue::Text(Some(s.to_uppercase())))
            }
            Self::PostalCode => {
                let s = text(field, value)?;
                if !CEP_RE.is_match(s) {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "use o formato XXXXX-XXX",
                    });
                }
                Ok(SqlValue::Text(Some(s.to_owned())))
            }
            Self::Cpf => {
                let s = text(field, value)?;
                if !CPF_RE.is_match(s) {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "deve conter 11 dígitos",
                    });
                }
                Ok(SqlValue::Text(Some(digits(s))))
            }
            Self::Email => {
                let s = text(field, value)?;
                if s.chars().count() > 150 {
                    return Err(ValidationError::TooLong { field, max: 150 });
                }
                if !EMAIL_RE.is_match(s) {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "endereço de email inválido",
                    });
                }
                Ok(SqlValue::Text(Some(s.to_lowercase())))
            }
            Self::Phone => {
                let s = text(field, value)?;
                let d = digits(s);
                if !PHONE_RE.is_match(s) || !(10..=11).contains(&d.len()) {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "deve conter 10 ou 11 dígitos",
                    });
                }
                Ok(SqlValue::Text(Some(d)))
            }
            Self::Secret { min } => {
                // Not trimmed: whitespace is part of a password.
                let s = value
                    .as_str()
                    .ok_or(ValidationError::WrongType { field, expected: "texto" })?;
                if s.chars().count() < min {
                    return Err(ValidationError::TooShort { field, min });
                }
                Ok(SqlValue::Text(Some(s.to_owned())))
            }
            Self::Choice(options) => {
                let s = text(field, value)?.to_uppercase();
                if !options.contains(&s.as_str()) {
                    return Err(ValidationError::InvalidVariant { field, value: s });
                }
                Ok(SqlValue::Text(Some(s)))
            }
            Self::Count => {
                let n = integer(field, value)?;
                if n < 0 {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "não pode ser negativo",
                    });
                }
                Ok(SqlValue::Int(Some(n)))
            }
            Self::Money => {
                let n = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }
                .filter(|n| n.is_finite())
                .ok_or(ValidationError::WrongType { field, expected: "um número" })?;
                if n < 0.0 {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "não pode ser negativo",
                    });
                }
                Ok(SqlValue::Money(Some(n)))
            }
            Self::Flag => value
                .as_bool()
                .map(|b| SqlValue::Bool(Some(b)))
                .ok_or(ValidationError::WrongType { field, expected: "booleano" }),
            Self::Date { allow_future } => {
                let s = text(field, value)?;
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
                    .ok_or(ValidationError::InvalidFormat {
                        field,
                        reason: "data inválida, use o formato AAAA-MM-DD",
                    })?;
                if !allow_future && date > Utc::now().date_naive() {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "não pode estar no futuro",
                    });
                }
                Ok(SqlValue::Date(Some(date)))
            }
            Self::Id => {
                let n = integer(field, value)?;
                if n <= 0 {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "deve ser um identificador positivo",
                    });
                }
                Ok(SqlValue::Int(Some(n)))
            }
        }
    }
}

/// Parse a path or query id.
pub fn parse_id(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    match raw.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "deve ser um identificador positivo",
        }),
    }
}

/// True when a payload value counts as absent.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn text<'v>(field: &'static str, value: &'v Value) -> Result<&'v str, ValidationError> {
    value
        .as_str()
        .map(str::trim)
        .ok_or(ValidationError::WrongType { field, expected: "texto" })
}

fn integer(field: &'static str, value: &Value) -> Result<i32, ValidationError> {
    let n = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    n.and_then(|n| i32::try_from(n).ok())
        .ok_or(ValidationError::WrongType { field, expected: "um número inteiro" })
}

fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}
