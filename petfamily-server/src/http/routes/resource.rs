//! Generic CRUD routes driven by a [`ResourceSpec`]
//!
//! - `GET    /<base>`       list, with the resource's query filters
//! - `POST   /<base>`       create
//! - `GET    /<base>/{id}`  get by id
//! - `PUT    /<base>/{id}`  partial update
//! - `DELETE /<base>/{id}`  delete, returning the prior row

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::{delete, get, post, put, MethodRouter};
use axum::Router;
use serde_json::{Map, Value};

use crate::db::ResourceRepo;
use crate::http::envelope::Envelope;
use crate::http::error::ApiError;
use crate::http::extractors::{ListQuery, Payload, ValidId};
use crate::http::server::AppState;
use crate::models::{validate_create, validate_update, Filters, ResourceSpec};

type Shared = State<Arc<AppState>>;

/// All five routes for `spec`.
pub fn router(spec: &'static ResourceSpec) -> Router<Arc<AppState>> {
    Router::new()
        .route(spec.path, collection(spec))
        .route(&item_path(spec), item(spec))
}

/// `GET` list and `POST` create on the base path.
pub fn collection(spec: &'static ResourceSpec) -> MethodRouter<Arc<AppState>> {
    listing(spec).merge(creating(spec))
}

/// `GET`, `PUT` and `DELETE` on `<base>/{id}`.
pub fn item(spec: &'static ResourceSpec) -> MethodRouter<Arc<AppState>> {
    reading(spec).merge(updating(spec)).merge(deleting(spec))
}

pub fn listing(spec: &'static ResourceSpec) -> MethodRouter<Arc<AppState>> {
    get(move |state: Shared, query: ListQuery| list(spec, state, query))
}

pub fn creating(spec: &'static ResourceSpec) -> MethodRouter<Arc<AppState>> {
    post(move |state: Shared, payload: Payload| create(spec, state, payload))
}

pub fn reading(spec: &'static ResourceSpec) -> MethodRouter<Arc<AppState>> {
    get(move |state: Shared, id: ValidId| show(spec, state, id))
}

pub fn updating(spec: &'static ResourceSpec) -> MethodRouter<Arc<AppState>> {
    put(move |state: Shared, id: ValidId, payload: Payload| update(spec, state, id, payload))
}

pub fn deleting(spec: &'static ResourceSpec) -> MethodRouter<Arc<AppState>> {
    delete(move |state: Shared, id: ValidId| destroy(spec, state, id))
}

pub fn item_path(spec: &ResourceSpec) -> String {
    format!("{}/{{id}}", spec.path)
}

async fn list(
    spec: &'static ResourceSpec,
    State(state): Shared,
    ListQuery(query): ListQuery,
) -> Result<Envelope<Vec<Value>>, ApiError> {
    let filters = spec.parse_filters(&query)?;
    list_filtered(spec, &state, &filters).await
}

/// List with already-parsed filters.
pub(crate) async fn list_filtered(
    spec: &'static ResourceSpec,
    state: &AppState,
    filters: &Filters,
) -> Result<Envelope<Vec<Value>>, ApiError> {
    let rows = ResourceRepo::new(&state.pool, spec).list(filters).await?;
    Ok(Envelope::new(spec.noun.listed(), rows))
}

async fn show(
    spec: &'static ResourceSpec,
    State(state): Shared,
    ValidId(id): ValidId,
) -> Result<Envelope<Value>, ApiError> {
    let row = ResourceRepo::new(&state.pool, spec).get(id).await?;
    Ok(Envelope::new(spec.noun.found(), row))
}

async fn create(
    spec: &'static ResourceSpec,
    State(state): Shared,
    Payload(payload): Payload,
) -> Result<Response, ApiError> {
    create_from(spec, &state, &payload).await
}

/// Validate and insert; shared with nested create routes.
pub(crate) async fn create_from(
    spec: &'static ResourceSpec,
    state: &AppState,
    payload: &Map<String, Value>,
) -> Result<Response, ApiError> {
    let record = validate_create(spec, payload)?;
    let row = ResourceRepo::new(&state.pool, spec).create(&record).await?;
    Ok(Envelope::new(spec.noun.created(), row).created())
}

async fn update(
    spec: &'static ResourceSpec,
    State(state): Shared,
    ValidId(id): ValidId,
    Payload(payload): Payload,
) -> Result<Envelope<Value>, ApiError> {
    let record = validate_update(spec, &payload)?;
    let row = ResourceRepo::new(&state.pool, spec).update(id, &record).await?;
    Ok(Envelope::new(spec.noun.updated(), row))
}

async fn destroy(
    spec: &'static ResourceSpec,
    State(state): Shared,
    ValidId(id): ValidId,
) -> Result<Envelope<Value>, ApiError> {
    let row = ResourceRepo::new(&state.pool, spec).delete(id).await?;
    Ok(Envelope::new(spec.noun.deleted(), row))
}
