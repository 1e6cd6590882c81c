//! SQLite-backed [`MessageStore`].
//!
//! Timestamps are stored as RFC 3339 text so rows stay readable with plain
//! `sqlite3` tooling and survive a future move to another backend unchanged.

use std::{str::FromStr, time::Duration};

use chrono::Utc;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::warn;

use super::{ContactMessage, MessageStore, NewContactMessage};

/// Upper bound on waiting for a pool connection; keeps a saturated pool from
/// stalling requests indefinitely.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating the file if missing) and migrate the database at `url`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database for tests. Capped at a single connection: each
    /// in-memory SQLite connection is its own database, so a larger pool
    /// would hand out connections that cannot see the migrated schema.
    pub async fn connect_in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

impl MessageStore for SqliteStore {
    async fn insert_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO contact_messages (name, email, message, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(ContactMessage {
            id: result.last_insert_rowid(),
            name: message.name,
            email: message.email,
            message: message.message,
            created_at,
        })
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (i64, String, String, String, String)>(
            "SELECT id, name, email, message, created_at FROM contact_messages \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email, message, created_at)| ContactMessage {
                id,
                name,
                email,
                message,
                created_at: created_at.parse().unwrap_or_else(|e| {
                    warn!(id, raw = %created_at, error = %e, "unparseable created_at; substituting now");
                    Utc::now()
                }),
            })
            .collect())
    }
}
