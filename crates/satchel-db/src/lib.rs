//! # satchel-db
//!
//! PostgreSQL database layer for the Satchel sync backend.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for users, shortcuts, history, and settings
//! - An aggregate [`Database`] context shared by the HTTP handlers
//!
//! ## Example
//!
//! ```rust,ignore
//! use satchel_db::{Database, UserRepository, UpsertUserRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/satchel").await?;
//!
//!     let user = db.users.upsert(UpsertUserRequest {
//!         firebase_uid: "abc123".to_string(),
//!         email: Some("d@example.com".to_string()),
//!         name: None,
//!         profile_image: None,
//!         login_provider: Some("google".to_string()),
//!     }).await?;
//!
//!     println!("Upserted user: {}", user.id);
//!     Ok(())
//! }
//! ```

pub mod history;
pub mod pool;
pub mod settings;
pub mod shortcuts;
pub mod users;

// Test fixtures for integration tests
// Note: always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use satchel_core::*;

// Re-export repository implementations
pub use history::PgHistoryRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use settings::PgSettingsRepository;
pub use shortcuts::PgShortcutRepository;
pub use users::PgUserRepository;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// User repository (upsert, lookup, uid resolution).
    pub users: PgUserRepository,
    /// Shortcut repository.
    pub shortcuts: PgShortcutRepository,
    /// History repository (append-only).
    pub history: PgHistoryRepository,
    /// Settings repository.
    pub settings: PgSettingsRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            shortcuts: PgShortcutRepository::new(pool.clone()),
            history: PgHistoryRepository::new(pool.clone()),
            settings: PgSettingsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with default pool configuration.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
