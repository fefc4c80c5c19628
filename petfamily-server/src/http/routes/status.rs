//! Contract status routes
//!
//! Reads and deletes are the generic ones. Creation always starts at
//! `emAprovacao`; updates go through the transition table.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use super::resource;
use crate::db::StatusRepo;
use crate::http::envelope::Envelope;
use crate::http::error::ApiError;
use crate::http::extractors::{Payload, ValidId};
use crate::http::server::AppState;
use crate::models::ContractState;
use crate::resources::contract::STATUS;

/// POST /status
async fn create_status(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let row = StatusRepo::new(&state.pool).create().await?;
    Ok(Envelope::new(STATUS.noun.created(), row).created())
}

/// PUT /status/{id}
async fn update_status(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Payload(payload): Payload,
) -> Result<Envelope<Value>, ApiError> {
    let target = ContractState::from_payload(&payload)?;
    let row = StatusRepo::new(&state.pool).transition(id, target).await?;
    Ok(Envelope::new(STATUS.noun.updated(), row))
}

/// Status routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(STATUS.path, resource::listing(&STATUS).post(create_status))
        .route(
            &resource::item_path(&STATUS),
            resource::reading(&STATUS)
                .merge(resource::deleting(&STATUS))
                .put(update_status),
        )
}
