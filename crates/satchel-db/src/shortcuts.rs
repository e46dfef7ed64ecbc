//! Shortcut repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use satchel_core::{
    new_v7, CreateShortcutRequest, Error, Result, Shortcut, ShortcutRepository,
    UpdateShortcutRequest,
};

/// PostgreSQL implementation of ShortcutRepository.
#[derive(Clone)]
pub struct PgShortcutRepository {
    pool: Pool<Postgres>,
}

impl PgShortcutRepository {
    /// Create a new PgShortcutRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortcutRepository for PgShortcutRepository {
    async fn insert(&self, user_id: Uuid, req: CreateShortcutRequest) -> Result<Shortcut> {
        let shortcut = sqlx::query_as::<_, Shortcut>(
            r#"
            INSERT INTO shortcuts (id, user_id, title, url, icon, is_pinned)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new_v7())
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.url)
        .bind(&req.icon)
        .bind(req.is_pinned)
        .fetch_one(&self.pool)
        .await?;

        Ok(shortcut)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Shortcut>> {
        let shortcuts = sqlx::query_as::<_, Shortcut>(
            r#"
            SELECT *
            FROM shortcuts
            WHERE user_id = $1
            ORDER BY is_pinned DESC, created_at_utc DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::trace!(
            subsystem = "db",
            component = "shortcuts",
            op = "list_for_user",
            user_id = %user_id,
            result_count = shortcuts.len(),
            "Listed shortcuts"
        );

        Ok(shortcuts)
    }

    async fn update(&self, id: Uuid, req: UpdateShortcutRequest) -> Result<Shortcut> {
        let shortcut = sqlx::query_as::<_, Shortcut>(
            r#"
            UPDATE shortcuts
            SET title = $1, url = $2, icon = $3, is_pinned = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.url)
        .bind(&req.icon)
        .bind(req.is_pinned)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::ShortcutNotFound(id))?;

        Ok(shortcut)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // Idempotent: deleting an already-removed shortcut succeeds.
        sqlx::query("DELETE FROM shortcuts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
