//! Settings HTTP handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{ApiError, AppState};
use satchel_core::{SettingsRepository, UpsertSettingsRequest, UserRepository, UserSettings};

/// Get a user's settings row, or JSON `null` if none was saved yet.
///
/// Returns 404 when the firebase uid names no user.
pub async fn get_settings(
    State(state): State<AppState>,
    Path(firebase_uid): Path<String>,
) -> Result<Json<Option<UserSettings>>, ApiError> {
    let user_id = state
        .db
        .users
        .resolve_id(&firebase_uid)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let settings = state.db.settings.fetch(user_id).await?;
    Ok(Json(settings))
}

/// Insert or replace the settings row for the user named in the body.
pub async fn upsert_settings(
    State(state): State<AppState>,
    Json(req): Json<UpsertSettingsRequest>,
) -> Result<Json<UserSettings>, ApiError> {
    let user_id = state
        .db
        .users
        .resolve_id(&req.firebase_uid)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let settings = state.db.settings.upsert(user_id, req).await?;
    Ok(Json(settings))
}
