//! Declarative description of a CRUD resource
//!
//! A [`ResourceSpec`] holds everything the generic repository and router
//! need: the table, the writable fields, the enriched projection, list
//! filters, uniqueness messages, dependents that block deletion and the
//! cross-row consistency rules.

use std::collections::HashMap;

use super::field::{parse_id, FieldKind, SqlValue};
use super::ValidationError;

/// Portuguese noun used in response messages
#[derive(Debug, Clone, Copy)]
pub struct Noun {
    pub singular: &'static str,
    pub plural: &'static str,
    pub feminine: bool,
}

impl Noun {
    fn ending(&self) -> &'static str {
        if self.feminine {
            "a"
        } else {
            "o"
        }
    }

    pub fn listed(&self) -> String {
        format!("{} listad{}s com sucesso", self.plural, self.ending())
    }

    pub fn found(&self) -> String {
        format!("{} encontrad{}", self.singular, self.ending())
    }

    pub fn not_found(&self) -> String {
        format!("{} não encontrad{}", self.singular, self.ending())
    }

    pub fn created(&self) -> String {
        format!("{} criad{} com sucesso", self.singular, self.ending())
    }

    pub fn updated(&self) -> String {
        format!("{} atualizad{} com sucesso", self.singular, self.ending())
    }

    pub fn deleted(&self) -> String {
        format!("{} excluíd{} com sucesso", self.singular, self.ending())
    }
}

/// A writable column
#[derive(Debug)]
pub struct Field {
    /// JSON key (camelCase)
    pub name: &'static str,
    /// Table column (snake_case)
    pub column: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Row that must exist when the value is non-null
    pub references: Option<&'static ResourceSpec>,
    /// Replaces the generic message on any parse failure
    pub hint: Option<&'static str>,
}

impl Field {
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            column,
            kind,
            required: false,
            references: None,
            hint: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn references(mut self, target: &'static ResourceSpec) -> Self {
        self.references = Some(target);
        self
    }

    pub const fn hint(mut self, message: &'static str) -> Self {
        self.hint = Some(message);
        self
    }

    /// Parse a non-null value, applying the field's hint.
    pub fn parse(&self, value: &serde_json::Value) -> Result<SqlValue, ValidationError> {
        self.kind.parse(self.name, value).map_err(|e| match self.hint {
            Some(message) => ValidationError::Rejected {
                field: self.name,
                message,
            },
            None => e,
        })
    }
}

/// How a list filter compares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Positive id equality
    Id,
    /// Exact text equality
    Exact,
    /// Text equality after uppercasing
    Upper,
    /// Case-insensitive substring match
    Contains,
}

/// Optional query-string filter on list endpoints
#[derive(Debug)]
pub struct Filter {
    /// Query parameter name
    pub param: &'static str,
    /// Column alias in the enriched projection
    pub alias: &'static str,
    pub op: FilterOp,
}

impl Filter {
    /// Parse a raw query value.
    pub fn parse(&self, raw: &str) -> Result<SqlValue, ValidationError> {
        let raw = raw.trim();
        Ok(match self.op {
            FilterOp::Id => SqlValue::Int(Some(parse_id(self.param, raw)?)),
            FilterOp::Exact => SqlValue::Text(Some(raw.to_owned())),
            FilterOp::Upper => SqlValue::Text(Some(raw.to_uppercase())),
            FilterOp::Contains => SqlValue::Text(Some(format!("%{}%", escape_like(raw)))),
        })
    }
}

/// Parsed list filters
pub type Filters = Vec<(&'static Filter, SqlValue)>;

/// Table whose rows block deleting the referenced row
#[derive(Debug)]
pub struct Dependent {
    pub table: &'static str,
    pub column: &'static str,
}

/// Cross-row rule checked inside the write transaction.
///
/// Values are the effective ones: the payload's when present, the stored
/// row's otherwise. A rule with any side missing is skipped.
#[derive(Debug)]
pub enum Consistency {
    /// Row `child` in `table` must carry `parent` in `column`
    BelongsTo {
        child: &'static str,
        table: &'static str,
        key: &'static str,
        column: &'static str,
        parent: &'static str,
        message: &'static str,
    },
    /// Rows `left` and `right` must agree on `column`
    SameParent {
        left: &'static str,
        left_table: &'static str,
        left_key: &'static str,
        right: &'static str,
        right_table: &'static str,
        right_key: &'static str,
        column: &'static str,
        message: &'static str,
    },
    /// Date `end` must not precede date `start`
    DateOrder {
        start: &'static str,
        end: &'static str,
        message: &'static str,
    },
    /// Changing `field` must not strand dependent rows.
    ///
    /// `mismatch` selects dependents that would disagree, with `$1` bound
    /// to the row id and `$2` to the new value. Only checked on update.
    KeepsDependents {
        field: &'static str,
        mismatch: &'static str,
        message: &'static str,
    },
}

impl Consistency {
    /// Payload fields that trigger the rule.
    pub fn inputs(&self) -> Vec<&'static str> {
        match self {
            Self::BelongsTo { child, parent, .. } => vec![*child, *parent],
            Self::SameParent { left, right, .. } => vec![*left, *right],
            Self::DateOrder { start, end, .. } => vec![*start, *end],
            Self::KeepsDependents { field, .. } => vec![*field],
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BelongsTo { message, .. }
            | Self::SameParent { message, .. }
            | Self::DateOrder { message, .. }
            | Self::KeepsDependents { message, .. } => *message,
        }
    }
}

/// Everything needed to serve one CRUD resource
#[derive(Debug)]
pub struct ResourceSpec {
    pub noun: Noun,
    /// Route base, e.g. `/cidades`
    pub path: &'static str,
    pub table: &'static str,
    /// Primary key column
    pub key: &'static str,
    /// Primary key alias in the enriched projection
    pub id_alias: &'static str,
    pub fields: &'static [Field],
    /// Message when required fields are missing on create
    pub required_message: &'static str,
    /// Enriched SELECT without WHERE; aliases are camelCase
    pub select: &'static str,
    pub order_by: &'static [&'static str],
    pub filters: &'static [Filter],
    /// Unique constraint name fragment and its message
    pub conflicts: &'static [(&'static str, &'static str)],
    pub conflict_message: &'static str,
    pub dependents: &'static [Dependent],
    pub in_use_message: &'static str,
    pub checks: &'static [Consistency],
}

impl ResourceSpec {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn filter(&self, param: &str) -> Option<&'static Filter> {
        self.filters.iter().find(|f| f.param == param)
    }

    /// Parse the list query string. Unknown parameters and blank values
    /// are ignored.
    pub fn parse_filters(&self, query: &HashMap<String, String>) -> Result<Filters, ValidationError> {
        let mut parsed = Vec::new();
        for filter in self.filters {
            match query.get(filter.param) {
                Some(raw) if !raw.trim().is_empty() => parsed.push((filter, filter.parse(raw)?)),
                _ => {}
            }
        }
        Ok(parsed)
    }

    /// Message for a unique violation on `constraint`.
    pub fn conflict_for(&self, constraint: Option<&str>) -> &'static str {
        constraint
            .and_then(|name| {
                self.conflicts
                    .iter()
                    .find(|(fragment, _)| name.contains(fragment))
                    .map(|(_, message)| *message)
            })
            .unwrap_or(self.conflict_message)
    }

    /// Field whose column a foreign-key constraint covers.
    pub fn reference_for(&self, constraint: Option<&str>) -> Option<&'static Field> {
        let name = constraint?;
        self.fields
            .iter()
            .filter(|f| f.references.is_some())
            .find(|f| name.contains(f.column))
    }
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
