//! HistoryStore trait — durable, append-only conversation history.
//!
//! The history store records every turn of the conversation in insertion
//! order and serves the "most recent N" reads that the recency cache and the
//! context assembler are built on.
//!
//! Implementations: SQLite (durable), in-memory (for testing and ephemeral
//! sessions).

use crate::error::HistoryError;
use crate::turn::{Role, Turn};
use async_trait::async_trait;

/// The core HistoryStore trait.
///
/// The sequence is strictly append-only: ids increase monotonically in
/// insertion order and turns are never updated or deleted. A single process
/// owns a single writer; no cross-process concurrency is supported.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// The backend name (e.g., "sqlite", "in_memory").
    fn name(&self) -> &str;

    /// Durably record a new turn at the end of the sequence and return its
    /// assigned id.
    ///
    /// On a storage failure the turn must NOT be assumed recorded — the
    /// error is propagated unchanged and never retried here.
    async fn append(
        &self,
        role: Role,
        message: &str,
    ) -> std::result::Result<i64, HistoryError>;

    /// Return up to `limit` most-recently-appended turns, ordered
    /// **oldest-to-newest**, or fewer if the history is shorter.
    async fn recent(&self, limit: usize) -> std::result::Result<Vec<Turn>, HistoryError>;

    /// Total number of turns recorded.
    async fn count(&self) -> std::result::Result<u64, HistoryError>;

    /// Flush and release the underlying storage handle.
    ///
    /// Called once at shutdown, on every exit path.
    async fn close(&self);
}
