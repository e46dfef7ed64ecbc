//! User HTTP handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{ApiError, AppState};
use satchel_core::{UpsertUserRequest, User, UserRepository};

/// Create a user or refresh an existing one's profile fields.
///
/// Keyed by `firebase_uid`; repeated calls with the same uid update the
/// same row. Returns the stored row.
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state.db.users.upsert(req).await?;
    Ok(Json(user))
}

/// Get a user by firebase uid.
///
/// Returns the row, or JSON `null` when no user exists for the uid.
pub async fn get_user(
    State(state): State<AppState>,
    Path(firebase_uid): Path<String>,
) -> Result<Json<Option<User>>, ApiError> {
    let user = state.db.users.fetch_by_firebase_uid(&firebase_uid).await?;
    Ok(Json(user))
}
