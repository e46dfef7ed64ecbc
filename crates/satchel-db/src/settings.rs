//! Settings repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use satchel_core::{Result, SettingsRepository, UpsertSettingsRequest, UserSettings};

/// PostgreSQL implementation of SettingsRepository.
#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: Pool<Postgres>,
}

impl PgSettingsRepository {
    /// Create a new PgSettingsRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn upsert(&self, user_id: Uuid, req: UpsertSettingsRequest) -> Result<UserSettings> {
        let settings = sqlx::query_as::<_, UserSettings>(
            r#"
            INSERT INTO settings (user_id, face_id_enabled, use_24_hour_time, theme)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id)
            DO UPDATE SET
                face_id_enabled = EXCLUDED.face_id_enabled,
                use_24_hour_time = EXCLUDED.use_24_hour_time,
                theme = EXCLUDED.theme,
                updated_at_utc = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(req.face_id_enabled)
        .bind(req.use_24_hour_time)
        .bind(&req.theme)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }

    async fn fetch(&self, user_id: Uuid) -> Result<Option<UserSettings>> {
        let settings =
            sqlx::query_as::<_, UserSettings>("SELECT * FROM settings WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(settings)
    }
}
