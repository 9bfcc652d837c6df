//! Liveness and diagnostics routes.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use serde_json::{Value, json};

use super::error::truncate;
use crate::state::{AppState, StoreHandle};

/// Most collection names listed by the diagnostics report.
const MAX_COLLECTIONS: usize = 10;

/// Longest error message included in the diagnostics report.
const ERROR_LIMIT: usize = 50;

/// Store state as seen by `GET /test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseState {
    Connected,
    NotConfigured,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub backend: &'static str,
    pub database: DatabaseState,
    pub connection_status: String,
    pub database_url: &'static str,
    pub database_name: &'static str,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostics))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Task Manager & CRM Backend is running" }))
}

/// Reports store connectivity. Failures end up in the body, never in the status.
async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    Json(collect_diagnostics(&state).await)
}

fn set_or_not(configured: bool) -> &'static str {
    if configured { "set" } else { "not_set" }
}

pub async fn collect_diagnostics(state: &AppState) -> Diagnostics {
    let mut report = Diagnostics {
        backend: "running",
        database: DatabaseState::NotConfigured,
        connection_status: "Database not available".to_string(),
        database_url: set_or_not(state.url_configured()),
        database_name: set_or_not(state.name_configured()),
        collections: Vec::new(),
        error: None,
    };

    match state.handle() {
        StoreHandle::NotConfigured => {}
        StoreHandle::Failed(reason) => {
            report.database = DatabaseState::Error;
            report.connection_status = "Database client could not be created".to_string();
            report.error = Some(truncate(reason, ERROR_LIMIT));
        }
        StoreHandle::Ready(store) => {
            let listed = match store.ping().await {
                Ok(()) => store.list_collections().await,
                Err(err) => Err(err),
            };

            match listed {
                Ok(mut names) => {
                    names.truncate(MAX_COLLECTIONS);
                    report.database = DatabaseState::Connected;
                    report.connection_status = "Database connection successful".to_string();
                    report.collections = names;
                }
                Err(err) => {
                    report.database = DatabaseState::Error;
                    report.connection_status = "Database connection failed".to_string();
                    report.error = Some(truncate(&err.to_string(), ERROR_LIMIT));
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use workdesk_core::{backend::StoreBackendBuilder, store::DocumentStore};
    use workdesk_memory::InMemoryStore;

    #[tokio::test]
    async fn unconfigured_store_is_reported() {
        let report = collect_diagnostics(&AppState::unconfigured()).await;

        assert_eq!(report.database, DatabaseState::NotConfigured);
        assert_eq!(report.database_url, "not_set");
        assert_eq!(report.database_name, "not_set");
        assert!(report.collections.is_empty());
        assert!(report.error.is_none());
    }

    #[tokio::test]
    async fn failed_client_error_is_truncated() {
        let state = AppState::new(StoreHandle::Failed("x".repeat(120)), true, true);
        let report = collect_diagnostics(&state).await;

        assert_eq!(report.database, DatabaseState::Error);
        assert_eq!(report.error.map(|e| e.chars().count()), Some(ERROR_LIMIT));
    }

    #[tokio::test]
    async fn connected_store_lists_collections() {
        let backend = InMemoryStore::builder().build().await.unwrap();
        let state = AppState::with_store(DocumentStore::new(backend));
        let report = collect_diagnostics(&state).await;

        assert_eq!(report.database, DatabaseState::Connected);
        assert_eq!(report.database_url, "set");
        assert!(report.collections.is_empty());
    }
}
