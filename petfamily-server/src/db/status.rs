//! Status repository
//!
//! Status rows carry a single `situacao`; the six flags rendered to clients
//! are derived from it. Writes go through the transition table in
//! [`ContractState`].

use serde_json::Value;
use sqlx::PgPool;

use super::error::DbError;
use super::repo::fetch_enriched;
use crate::models::ContractState;
use crate::resources::contract::STATUS;

/// Status repository
pub struct StatusRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StatusRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a status row in the initial `emAprovacao` state.
    pub async fn create(&self) -> Result<Value, DbError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO status (situacao) VALUES ($1) RETURNING id_status",
        )
        .bind(ContractState::PendingApproval.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let row = fetch_enriched(&mut tx, &STATUS, id).await?;
        tx.commit().await?;

        tracing::debug!(id, "status created");
        Ok(row)
    }

    /// Move a status row to `target`.
    ///
    /// Moving to the current state writes nothing and returns the row as
    /// stored, so repeating a successful request is harmless.
    ///
    /// # Errors
    ///
    /// [`DbError::NotFound`] for an unknown id, [`DbError::InvalidTransition`]
    /// when the table forbids the move.
    pub async fn transition(&self, id: i32, target: ContractState) -> Result<Value, DbError> {
        let mut tx = self.pool.begin().await?;

        let stored: Option<String> =
            sqlx::query_scalar("SELECT situacao FROM status WHERE id_status = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let stored = stored.ok_or_else(|| DbError::not_found(&STATUS))?;
        let current: ContractState = stored.parse().map_err(DbError::Invalid)?;

        if !current.can_transition_to(target) {
            return Err(DbError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        if current != target {
            sqlx::query(
                "UPDATE status SET situacao = $1, atualizado_em = NOW() WHERE id_status = $2",
            )
            .bind(target.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;
            tracing::info!(id, from = %current, to = %target, "status transition");
        }

        let row = fetch_enriched(&mut tx, &STATUS, id).await?;
        tx.commit().await?;
        Ok(row)
    }
}
