//! History repository implementation.
//!
//! History is an append-only log; the trait deliberately exposes no update
//! or delete operations.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use satchel_core::{new_v7, AppendHistoryRequest, HistoryEntry, HistoryRepository, Result};

/// PostgreSQL implementation of HistoryRepository.
#[derive(Clone)]
pub struct PgHistoryRepository {
    pool: Pool<Postgres>,
}

impl PgHistoryRepository {
    /// Create a new PgHistoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn append(&self, user_id: Uuid, req: AppendHistoryRequest) -> Result<HistoryEntry> {
        let entry = sqlx::query_as::<_, HistoryEntry>(
            r#"
            INSERT INTO history (id, user_id, title, url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new_v7())
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.url)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<HistoryEntry>> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT *
            FROM history
            WHERE user_id = $1
            ORDER BY visited_at_utc DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::trace!(
            subsystem = "db",
            component = "history",
            op = "list_for_user",
            user_id = %user_id,
            result_count = entries.len(),
            "Listed history"
        );

        Ok(entries)
    }
}
