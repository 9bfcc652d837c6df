//! HTTP surface of the backend.
//!
//! `/` and `/test` report liveness and store state; the entity routes live
//! under `/api`.

pub mod entities;
pub mod error;
pub mod health;
pub mod params;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use error::{ApiError, ApiResult};

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::health_routes())
        .nest("/api", entities::entity_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
