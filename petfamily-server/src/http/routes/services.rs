//! Lodging services
//!
//! Listed and created under their lodging, addressed directly by id.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use super::resource;
use crate::db::ResourceRepo;
use crate::http::envelope::Envelope;
use crate::http::error::ApiError;
use crate::http::extractors::{Payload, ValidId};
use crate::http::server::AppState;
use crate::models::SqlValue;
use crate::resources::lodging::{LODGING, SERVICE, SERVICES_OF_LODGING};

/// 404 unless the lodging exists.
async fn require_lodging(state: &AppState, id: i32) -> Result<(), ApiError> {
    ResourceRepo::new(&state.pool, &LODGING).get(id).await?;
    Ok(())
}

/// GET /hospedagens/{id}/servicos
async fn list_services(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Envelope<Vec<Value>>, ApiError> {
    require_lodging(&state, id).await?;
    let filters = vec![(&SERVICES_OF_LODGING, SqlValue::Int(Some(id)))];
    resource::list_filtered(&SERVICE, &state, &filters).await
}

/// POST /hospedagens/{id}/servicos
///
/// The lodging comes from the path; an `idHospedagem` in the body is
/// overridden.
async fn create_service(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Payload(mut payload): Payload,
) -> Result<Response, ApiError> {
    require_lodging(&state, id).await?;
    payload.insert("idHospedagem".to_owned(), json!(id));
    resource::create_from(&SERVICE, &state, &payload).await
}

/// Service routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/servicos", resource::item_path(&LODGING)),
            get(list_services).post(create_service),
        )
        .route(&resource::item_path(&SERVICE), resource::item(&SERVICE))
}
