//! User repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use satchel_core::{new_v7, Result, UpsertUserRequest, User, UserRepository};

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn upsert(&self, req: UpsertUserRequest) -> Result<User> {
        // The generated id only lands on first insert; a conflict keeps the
        // existing row's id so dependent rows never move.
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, firebase_uid, email, name, profile_image, login_provider)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (firebase_uid)
            DO UPDATE SET
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                profile_image = EXCLUDED.profile_image,
                login_provider = EXCLUDED.login_provider,
                updated_at_utc = now()
            RETURNING *
            "#,
        )
        .bind(new_v7())
        .bind(&req.firebase_uid)
        .bind(&req.email)
        .bind(&req.name)
        .bind(&req.profile_image)
        .bind(&req.login_provider)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            subsystem = "db",
            component = "users",
            op = "upsert",
            user_id = %user.id,
            firebase_uid = %user.firebase_uid,
            "Upserted user"
        );

        Ok(user)
    }

    async fn fetch_by_firebase_uid(&self, firebase_uid: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE firebase_uid = $1")
            .bind(firebase_uid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn resolve_id(&self, firebase_uid: &str) -> Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE firebase_uid = $1")
            .bind(firebase_uid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }
}
