//! History HTTP handlers.
//!
//! History is append-only: list and append are the entire surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{ApiError, AppState};
use satchel_core::{AppendHistoryRequest, HistoryEntry, HistoryRepository, UserRepository};

/// List a user's browsing history, newest visit first.
pub async fn list_history(
    State(state): State<AppState>,
    Path(firebase_uid): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let user_id = state
        .db
        .users
        .resolve_id(&firebase_uid)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let entries = state.db.history.list_for_user(user_id).await?;
    Ok(Json(entries))
}

/// Append a history entry for the user named in the body.
pub async fn append_history(
    State(state): State<AppState>,
    Json(req): Json<AppendHistoryRequest>,
) -> Result<(StatusCode, Json<HistoryEntry>), ApiError> {
    let user_id = state
        .db
        .users
        .resolve_id(&req.firebase_uid)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let entry = state.db.history.append(user_id, req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
