//! Shortcut HTTP handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{ApiError, AppState};
use satchel_core::{
    CreateShortcutRequest, Shortcut, ShortcutRepository, UpdateShortcutRequest, UserRepository,
};

/// List a user's shortcuts, pinned first, then newest first.
///
/// Returns 404 when the firebase uid names no user.
pub async fn list_shortcuts(
    State(state): State<AppState>,
    Path(firebase_uid): Path<String>,
) -> Result<Json<Vec<Shortcut>>, ApiError> {
    let user_id = state
        .db
        .users
        .resolve_id(&firebase_uid)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let shortcuts = state.db.shortcuts.list_for_user(user_id).await?;
    Ok(Json(shortcuts))
}

/// Create a shortcut for the user named in the body.
pub async fn create_shortcut(
    State(state): State<AppState>,
    Json(req): Json<CreateShortcutRequest>,
) -> Result<(StatusCode, Json<Shortcut>), ApiError> {
    let user_id = state
        .db
        .users
        .resolve_id(&req.firebase_uid)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let shortcut = state.db.shortcuts.insert(user_id, req).await?;
    Ok((StatusCode::CREATED, Json(shortcut)))
}

/// Replace a shortcut's mutable fields. 404 when the id is unknown.
pub async fn update_shortcut(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateShortcutRequest>,
) -> Result<Json<Shortcut>, ApiError> {
    let shortcut = state.db.shortcuts.update(id, req).await?;
    Ok(Json(shortcut))
}

/// Delete a shortcut. Idempotent: an already-removed id still confirms.
pub async fn delete_shortcut(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.db.shortcuts.delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Shortcut deleted" })))
}
