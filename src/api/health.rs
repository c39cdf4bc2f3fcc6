//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Store backend that was checked, readiness only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: None,
        }
    }

    fn with_store(mut self, store: &str) -> Self {
        self.store = Some(store.to_string());
        self
    }
}

/// Liveness; never touches the store
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Readiness check endpoint (checks store connectivity)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.config.database.backend.as_str();
    match state.services.catalog.ready().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse::new("ready").with_store(backend)),
        ),
        Err(e) => {
            tracing::warn!(error = %e, store = backend, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new("unavailable").with_store(backend)),
            )
        }
    }
}
