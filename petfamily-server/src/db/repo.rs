//! Generic resource repository
//!
//! Every write runs in one transaction:
//! 1. lock the target row `FOR UPDATE` (update, delete)
//! 2. lock referenced rows `FOR KEY SHARE` and confirm they exist
//! 3. check consistency rules against effective values
//! 4. write
//! 5. re-read the enriched row and commit
//!
//! Reads return the enriched projection as JSON objects.

use serde_json::Value;
use sqlx::postgres::PgConnection;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::error::{delete_error, write_error, DbError};
use crate::models::{Consistency, FilterOp, Filters, Record, ResourceSpec, SqlValue, ValidationError};

/// Alias of the wrapped projection
const ROW: &str = "enriched";

/// Repository for one declared resource
pub struct ResourceRepo<'a> {
    pool: &'a PgPool,
    spec: &'static ResourceSpec,
}

impl<'a> ResourceRepo<'a> {
    pub fn new(pool: &'a PgPool, spec: &'static ResourceSpec) -> Self {
        Self { pool, spec }
    }

    /// List rows matching `filters`, in the resource's order.
    pub async fn list(&self, filters: &Filters) -> Result<Vec<Value>, DbError> {
        let mut qb = enriched_query(self.spec);
        for (i, (filter, value)) in filters.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(format_args!("{}.\"{}\"", ROW, filter.alias));
            match filter.op {
                FilterOp::Contains => qb.push(" ILIKE "),
                FilterOp::Id | FilterOp::Exact | FilterOp::Upper => qb.push(" = "),
            };
            push_value(&mut qb, value);
        }
        push_order(&mut qb, self.spec);

        let rows = qb
            .build_query_scalar::<Json<Value>>()
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    /// Fetch one enriched row by id.
    pub async fn get(&self, id: i32) -> Result<Value, DbError> {
        self.find_by(self.spec.id_alias, SqlValue::Int(Some(id))).await
    }

    /// Fetch one enriched row by a projected column.
    pub async fn find_by(&self, alias: &str, value: SqlValue) -> Result<Value, DbError> {
        let mut qb = enriched_query(self.spec);
        qb.push(format_args!(" WHERE {}.\"{}\" = ", ROW, alias));
        push_value(&mut qb, &value);
        qb.push(" LIMIT 1");

        qb.build_query_scalar::<Json<Value>>()
            .fetch_optional(self.pool)
            .await?
            .map(|Json(row)| row)
            .ok_or_else(|| DbError::not_found(self.spec))
    }

    /// Insert a validated record and return the enriched row.
    pub async fn create(&self, record: &Record) -> Result<Value, DbError> {
        let spec = self.spec;
        let mut tx = self.pool.begin().await?;

        lock_references(&mut tx, record).await?;
        check_consistency(&mut tx, spec, record, None).await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO {}", spec.table));
        if record.is_empty() {
            qb.push(" DEFAULT VALUES");
        } else {
            qb.push(" (");
            for (i, (field, _)) in record.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                qb.push(field.column);
            }
            qb.push(") VALUES (");
            for (i, (_, value)) in record.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_value(&mut qb, value);
            }
            qb.push(")");
        }
        qb.push(format_args!(" RETURNING {}", spec.key));

        let id = qb
            .build_query_scalar::<i32>()
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| write_error(spec, e))?;

        let row = fetch_enriched(&mut tx, spec, id).await?;
        tx.commit().await?;

        tracing::debug!(table = spec.table, id, "row created");
        Ok(row)
    }

    /// Apply a partial update and return the enriched row.
    pub async fn update(&self, id: i32, record: &Record) -> Result<Value, DbError> {
        let spec = self.spec;
        let mut tx = self.pool.begin().await?;

        let current = lock_row(&mut tx, spec, id)
            .await?
            .ok_or_else(|| DbError::not_found(spec))?;
        lock_references(&mut tx, record).await?;
        check_consistency(&mut tx, spec, record, Some((id, &current))).await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", spec.table));
        for (i, (field, value)) in record.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(format_args!("{} = ", field.column));
            push_value(&mut qb, value);
        }
        qb.push(format_args!(" WHERE {} = ", spec.key));
        qb.push_bind(id);

        qb.build()
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error(spec, e))?;

        let row = fetch_enriched(&mut tx, spec, id).await?;
        tx.commit().await?;

        tracing::debug!(table = spec.table, id, "row updated");
        Ok(row)
    }

    /// Delete a row with no dependents, returning its prior contents.
    pub async fn delete(&self, id: i32) -> Result<Value, DbError> {
        let spec = self.spec;
        let mut tx = self.pool.begin().await?;

        lock_row(&mut tx, spec, id)
            .await?
            .ok_or_else(|| DbError::not_found(spec))?;
        let row = fetch_enriched(&mut tx, spec, id).await?;

        for dependent in spec.dependents {
            let sql = format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)",
                dependent.table, dependent.column
            );
            let in_use: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(&mut *tx).await?;
            if in_use {
                return Err(DbError::InUse {
                    message: spec.in_use_message,
                });
            }
        }

        sqlx::query(&format!("DELETE FROM {} WHERE {} = $1", spec.table, spec.key))
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| delete_error(spec, e))?;
        tx.commit().await?;

        tracing::debug!(table = spec.table, id, "row deleted");
        Ok(row)
    }
}

/// `SELECT to_jsonb(enriched) FROM (<projection>) enriched`
fn enriched_query(spec: &ResourceSpec) -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!(
        "SELECT to_jsonb({row}) AS data FROM ({select}) {row}",
        row = ROW,
        select = spec.select
    ))
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, spec: &ResourceSpec) {
    for (i, alias) in spec.order_by.iter().enumerate() {
        qb.push(if i == 0 { " ORDER BY " } else { ", " });
        qb.push(format_args!("{}.\"{}\"", ROW, alias));
    }
}

/// Bind a value with its Postgres type; NULLs keep their type.
fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &SqlValue) {
    match value {
        SqlValue::Text(v) => qb.push_bind(v.clone()),
        SqlValue::Int(v) => qb.push_bind(*v),
        SqlValue::Money(v) => qb.push_bind(*v).push("::numeric"),
        SqlValue::Bool(v) => qb.push_bind(*v),
        SqlValue::Date(v) => qb.push_bind(*v),
    };
}

/// Enriched row inside a transaction; the row must exist.
pub(crate) async fn fetch_enriched(
    conn: &mut PgConnection,
    spec: &'static ResourceSpec,
    id: i32,
) -> Result<Value, DbError> {
    let mut qb = enriched_query(spec);
    qb.push(format_args!(" WHERE {}.\"{}\" = ", ROW, spec.id_alias));
    qb.push_bind(id);

    qb.build_query_scalar::<Json<Value>>()
        .fetch_optional(&mut *conn)
        .await?
        .map(|Json(row)| row)
        .ok_or_else(|| DbError::not_found(spec))
}

/// Lock the stored row and return its raw columns.
async fn lock_row(
    conn: &mut PgConnection,
    spec: &ResourceSpec,
    id: i32,
) -> Result<Option<Value>, DbError> {
    let sql = format!(
        "SELECT to_jsonb(t) FROM {} t WHERE t.{} = $1 FOR UPDATE",
        spec.table, spec.key
    );
    let row: Option<Json<Value>> = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(|Json(v)| v))
}

/// Confirm every non-null reference exists and hold it until commit.
async fn lock_references(conn: &mut PgConnection, record: &Record) -> Result<(), DbError> {
    for (field, value) in record.iter() {
        let (Some(target), Some(id)) = (field.references, value.as_int()) else {
            continue;
        };
        let sql = format!(
            "SELECT 1 FROM {} WHERE {} = $1 FOR KEY SHARE",
            target.table, target.key
        );
        let found: Option<i32> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        if found.is_none() {
            return Err(DbError::ReferenceNotFound {
                field: field.name,
                message: target.noun.not_found(),
            });
        }
    }
    Ok(())
}

/// Effective value for a field: the payload's, else the stored row's.
fn effective(
    spec: &ResourceSpec,
    record: &Record,
    current: Option<&Value>,
    name: &str,
) -> Option<SqlValue> {
    if let Some(value) = record.get(name) {
        return Some(value.clone());
    }
    let field = spec.field(name)?;
    let stored = current?.get(field.column)?;
    if stored.is_null() {
        return None;
    }
    field.kind.parse(field.name, stored).ok()
}

async fn check_consistency(
    conn: &mut PgConnection,
    spec: &'static ResourceSpec,
    record: &Record,
    stored: Option<(i32, &Value)>,
) -> Result<(), DbError> {
    let current = stored.map(|(_, row)| row);
    for check in spec.checks {
        if !check.inputs().iter().any(|name| record.contains(name)) {
            continue;
        }
        let value = |name: &str| effective(spec, record, current, name);
        let consistent = match *check {
            Consistency::BelongsTo {
                child,
                table,
                key,
                column,
                parent,
                ..
            } => {
                let (Some(child_id), Some(parent_id)) = (
                    value(child).and_then(|v| v.as_int()),
                    value(parent).and_then(|v| v.as_int()),
                ) else {
                    continue;
                };
                let sql = format!("SELECT {} FROM {} WHERE {} = $1 FOR SHARE", column, table, key);
                let owner: Option<Option<i32>> = sqlx::query_scalar(&sql)
                    .bind(child_id)
                    .fetch_optional(&mut *conn)
                    .await?;
                // A missing child is reported by the reference check.
                owner.map_or(true, |owner| owner == Some(parent_id))
            }
            Consistency::SameParent {
                left,
                left_table,
                left_key,
                right,
                right_table,
                right_key,
                column,
                ..
            } => {
                let (Some(left_id), Some(right_id)) = (
                    value(left).and_then(|v| v.as_int()),
                    value(right).and_then(|v| v.as_int()),
                ) else {
                    continue;
                };
                let sql = format!(
                    "SELECT (SELECT {column} FROM {left_table} WHERE {left_key} = $1 FOR SHARE) \
                     IS NOT DISTINCT FROM \
                     (SELECT {column} FROM {right_table} WHERE {right_key} = $2 FOR SHARE)"
                );
                sqlx::query_scalar::<_, bool>(&sql)
                    .bind(left_id)
                    .bind(right_id)
                    .fetch_one(&mut *conn)
                    .await?
            }
            Consistency::DateOrder { start, end, .. } => {
                match (
                    value(start).and_then(|v| v.as_date()),
                    value(end).and_then(|v| v.as_date()),
                ) {
                    (Some(start), Some(end)) => end >= start,
                    _ => true,
                }
            }
            Consistency::KeepsDependents {
                field, mismatch, ..
            } => {
                // New rows have no dependents yet
                let Some((id, _)) = stored else {
                    continue;
                };
                let target = record.get(field).and_then(|v| v.as_int());
                let sql = format!("SELECT NOT EXISTS({mismatch})");
                sqlx::query_scalar::<_, bool>(&sql)
                    .bind(id)
                    .bind(target)
                    .fetch_one(&mut *conn)
                    .await?
            }
        };
        if !consistent {
            return Err(DbError::Invalid(ValidationError::Inconsistent {
                message: check.message(),
            }));
        }
    }
    Ok(())
}
