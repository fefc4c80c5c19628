//! Secondary lookups: state by code, breeds of a species

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use serde_json::Value;

use super::resource;
use crate::db::ResourceRepo;
use crate::http::envelope::Envelope;
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::{FieldKind, SqlValue, ValidationError};
use crate::resources::address::STATE;
use crate::resources::pet::{BREED, BREEDS_OF_SPECIES};

/// GET /estados/sigla/{sigla}
async fn state_by_code(
    State(state): State<Arc<AppState>>,
    Path(sigla): Path<String>,
) -> Result<Envelope<Value>, ApiError> {
    let code = FieldKind::StateCode
        .parse("sigla", &Value::String(sigla))
        .map_err(|_| ValidationError::Rejected {
            field: "sigla",
            message: "A sigla deve ter exatamente 2 letras",
        })?;
    let row = ResourceRepo::new(&state.pool, &STATE)
        .find_by("sigla", code)
        .await?;
    Ok(Envelope::new(STATE.noun.found(), row))
}

/// GET /raca/especie/{id}
async fn breeds_of_species(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Envelope<Vec<Value>>, ApiError> {
    let filters = vec![(&BREEDS_OF_SPECIES, SqlValue::Int(Some(id)))];
    resource::list_filtered(&BREED, &state, &filters).await
}

/// Lookup routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/sigla/{{sigla}}", STATE.path), get(state_by_code))
        .route(&format!("{}/especie/{{id}}", BREED.path), get(breeds_of_species))
}
