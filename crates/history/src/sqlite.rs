//! SQLite history backend.
//!
//! Uses a single SQLite database file with one table:
//! - `turns` — the append-only conversation log
//!
//! The integer primary key is the ordering authority: "most recent N" reads
//! are served by `ORDER BY id DESC LIMIT ?` against the id index and then
//! reversed into chronological order.

use async_trait::async_trait;
use chrono::Utc;
use genius_core::error::HistoryError;
use genius_core::history::HistoryStore;
use genius_core::turn::{Role, Turn};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// A durable SQLite history store.
pub struct SqliteHistory {
    pool: SqlitePool,
}

impl SqliteHistory {
    /// Open (or create) the history database at `path`.
    ///
    /// The table and index are created automatically. Pass `":memory:"` for
    /// an in-process ephemeral database (useful for tests).
    ///
    /// The pool is capped at a single connection: there is exactly one
    /// conversation and one writer, and reads must observe every completed
    /// append on the same store instance.
    pub async fn open(path: &str) -> Result<Self, HistoryError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| HistoryError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| HistoryError::Storage(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("SQLite history store initialized at {path}");
        Ok(store)
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, HistoryError> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run schema migrations — creates the turns table and ordering index.
    async fn run_migrations(&self) -> Result<(), HistoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS turns (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                role       TEXT NOT NULL,
                message    TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| HistoryError::MigrationFailed(format!("turns table: {e}")))?;

        // Secondary index on id to serve "most recent N" retrieval
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_turns_id ON turns(id)")
            .execute(&self.pool)
            .await
            .map_err(|e| HistoryError::MigrationFailed(format!("id index: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    /// Parse a `Turn` from a SQLite row.
    fn row_to_turn(row: &sqlx::sqlite::SqliteRow) -> Result<Turn, HistoryError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| HistoryError::QueryFailed(format!("id column: {e}")))?;
        let role_str: String = row
            .try_get("role")
            .map_err(|e| HistoryError::QueryFailed(format!("role column: {e}")))?;
        let message: String = row
            .try_get("message")
            .map_err(|e| HistoryError::QueryFailed(format!("message column: {e}")))?;
        let created_at_str: String = row
            .try_get("created_at")
            .map_err(|e| HistoryError::QueryFailed(format!("created_at column: {e}")))?;

        let role = Role::from_str(&role_str)
            .map_err(|e| HistoryError::QueryFailed(format!("role column: {e}")))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Turn {
            id,
            role,
            message,
            created_at,
        })
    }
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn append(&self, role: Role, message: &str) -> Result<i64, HistoryError> {
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO turns (role, message, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(role.as_str())
        .bind(message)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| HistoryError::Storage(format!("INSERT failed: {e}")))?;

        let id = result.last_insert_rowid();
        debug!(turn_id = id, role = %role, "Appended turn");
        Ok(id)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Turn>, HistoryError> {
        let rows = sqlx::query(
            "SELECT id, role, message, created_at FROM turns ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HistoryError::QueryFailed(format!("recent query: {e}")))?;

        // Reverse the reverse-chronological retrieval into oldest-to-newest
        let mut turns: Vec<Turn> = rows
            .iter()
            .map(Self::row_to_turn)
            .collect::<Result<_, _>>()?;
        turns.reverse();

        debug_assert!(
            turns.windows(2).all(|w| w[0].id < w[1].id),
            "turn ids must be strictly increasing"
        );

        Ok(turns)
    }

    async fn count(&self) -> Result<u64, HistoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM turns")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| HistoryError::QueryFailed(format!("COUNT: {e}")))?;

        let cnt: i64 = row
            .try_get("cnt")
            .map_err(|e| HistoryError::QueryFailed(format!("cnt column: {e}")))?;

        Ok(cnt as u64)
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("SQLite history store closed");
    }
}
