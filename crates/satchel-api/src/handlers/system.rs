//! Liveness and diagnostics handlers.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use chrono::{DateTime, Utc};

use crate::{ApiError, AppState};

/// Plain-text liveness probe.
pub async fn root() -> &'static str {
    "Satchel sync backend running"
}

/// JSON health check with build version.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Round-trip to the database, returning its current timestamp.
///
/// Useful for verifying connectivity and clock skew from a deployed client.
pub async fn test_db(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let now: DateTime<Utc> = sqlx::query_scalar("SELECT NOW()")
        .fetch_one(state.db.pool())
        .await
        .map_err(satchel_core::Error::from)?;

    Ok(Json(serde_json::json!({ "now": now })))
}

/// Serve the OpenAPI YAML spec.
pub async fn openapi_yaml() -> impl IntoResponse {
    const SPEC: &str = include_str!("../openapi.yaml");
    ([(header::CONTENT_TYPE, "application/yaml")], SPEC)
}
