//! Repository traits for the Satchel backend.
//!
//! These traits define the interfaces the database layer implements,
//! keeping the HTTP handlers decoupled from concrete SQL and testable
//! against alternative implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request for creating or refreshing a user by firebase uid.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpsertUserRequest {
    pub firebase_uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub login_provider: Option<String>,
}

/// Request for creating a shortcut. The owning user is named by
/// firebase uid; the handler resolves it to the internal id.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateShortcutRequest {
    pub firebase_uid: String,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
}

/// Request for replacing a shortcut's mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateShortcutRequest {
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
}

/// Request for appending a history entry.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AppendHistoryRequest {
    pub firebase_uid: String,
    pub title: Option<String>,
    pub url: String,
}

fn default_theme() -> String {
    crate::defaults::DEFAULT_THEME.to_string()
}

/// Request for saving a user's settings. Omitted fields fall back to the
/// column defaults rather than writing NULL.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpsertSettingsRequest {
    pub firebase_uid: String,
    #[serde(default)]
    pub face_id_enabled: bool,
    #[serde(default)]
    pub use_24_hour_time: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Repository for user rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user or refresh the profile fields of an existing one,
    /// keyed by firebase uid. Returns the stored row.
    async fn upsert(&self, req: UpsertUserRequest) -> Result<User>;

    /// Fetch a user by firebase uid.
    async fn fetch_by_firebase_uid(&self, firebase_uid: &str) -> Result<Option<User>>;

    /// Resolve a firebase uid to the internal user id.
    async fn resolve_id(&self, firebase_uid: &str) -> Result<Option<Uuid>>;
}

/// Repository for shortcut rows.
#[async_trait]
pub trait ShortcutRepository: Send + Sync {
    /// Insert a shortcut for the given (already resolved) user.
    async fn insert(&self, user_id: Uuid, req: CreateShortcutRequest) -> Result<Shortcut>;

    /// List a user's shortcuts: pinned first, then newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Shortcut>>;

    /// Replace a shortcut's mutable fields. Errors with
    /// [`crate::Error::ShortcutNotFound`] when no row matches.
    async fn update(&self, id: Uuid, req: UpdateShortcutRequest) -> Result<Shortcut>;

    /// Delete a shortcut. Deleting an id that is already gone is not an
    /// error.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for history rows. Append-only.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append a history entry for the given user.
    async fn append(&self, user_id: Uuid, req: AppendHistoryRequest) -> Result<HistoryEntry>;

    /// List a user's history, newest visit first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<HistoryEntry>>;
}

/// Repository for per-user settings rows.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Insert or replace the settings row for the given user.
    async fn upsert(&self, user_id: Uuid, req: UpsertSettingsRequest) -> Result<UserSettings>;

    /// Fetch the settings row for the given user, if any.
    async fn fetch(&self, user_id: Uuid) -> Result<Option<UserSettings>>;
}
