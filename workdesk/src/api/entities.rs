//! Create and list routes for the five entity collections.
//!
//! Every entity gets the same pair of handlers, instantiated per type. Task
//! listing additionally accepts a `status` filter.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::{JsonRejection, QueryRejection}},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use workdesk_core::{
    document::{Entity, EntityKind},
    schema::{Company, Contact, Deal, Project, Task},
};

use super::error::ApiResult;
use super::params::ListParams;
use crate::state::AppState;

/// Body returned by create endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Route path of an entity's collection, relative to `/api`.
pub const fn route_path(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Company => "/companies",
        EntityKind::Contact => "/contacts",
        EntityKind::Deal => "/deals",
        EntityKind::Project => "/projects",
        EntityKind::Task => "/tasks",
    }
}

/// Build the entity router
pub fn entity_routes() -> Router<AppState> {
    Router::new()
        .route(
            route_path(Company::KIND),
            get(list_entities::<Company>).post(create_entity::<Company>),
        )
        .route(
            route_path(Contact::KIND),
            get(list_entities::<Contact>).post(create_entity::<Contact>),
        )
        .route(
            route_path(Deal::KIND),
            get(list_entities::<Deal>).post(create_entity::<Deal>),
        )
        .route(
            route_path(Project::KIND),
            get(list_entities::<Project>).post(create_entity::<Project>),
        )
        .route(
            route_path(Task::KIND),
            get(list_tasks).post(create_entity::<Task>),
        )
}

/// Validate the body as `E` and store it
async fn create_entity<E: Entity>(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(payload) = body?;
    let record = E::from_payload(&payload)?;

    let id = state.store()?.collection::<E>().insert(&record).await?;
    info!(collection = E::collection_name(), %id, "created record");

    Ok(Json(CreatedResponse { id }))
}

/// List records of `E`, capped by `limit`
async fn list_entities<E: Entity>(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<Vec<Value>>> {
    let Query(raw) = query?;
    let params = ListParams::parse(&raw)?;

    let records = state.store()?.collection::<E>().list(params.to_query()).await?;

    Ok(Json(records))
}

/// List tasks, optionally only those with the given `status`
async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<Vec<Value>>> {
    let Query(raw) = query?;
    let params = ListParams::parse(&raw)?;

    let records = state
        .store()?
        .collection::<Task>()
        .list(params.to_status_query())
        .await?;

    Ok(Json(records))
}
