//! Core data models for the Satchel backend.
//!
//! These types are shared across all Satchel crates and map 1:1 onto the
//! database tables. Field names match column names so the `FromRow` derive
//! needs no renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// `firebase_uid` is the external identity-provider identifier; every client
/// request names the user by it. `id` is the internal key all dependent
/// tables reference.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct User {
    pub id: Uuid,
    pub firebase_uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub login_provider: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// A bookmarked shortcut on the user's start page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct Shortcut {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub is_pinned: bool,
    pub created_at_utc: DateTime<Utc>,
}

/// A single browsing-history entry. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub url: String,
    pub visited_at_utc: DateTime<Utc>,
}

/// Per-user preferences. Exactly one row per user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct UserSettings {
    pub user_id: Uuid,
    pub face_id_enabled: bool,
    pub use_24_hour_time: bool,
    pub theme: String,
    pub updated_at_utc: DateTime<Utc>,
}
