//! In-memory history — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use genius_core::error::HistoryError;
use genius_core::history::HistoryStore;
use genius_core::turn::{Role, Turn};
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory history store backed by a Vec.
/// Useful for tests and sessions where persistence isn't needed.
pub struct InMemoryHistory {
    turns: Arc<RwLock<Vec<Turn>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self {
            turns: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn append(&self, role: Role, message: &str) -> Result<i64, HistoryError> {
        let mut turns = self.turns.write().await;
        let id = turns.last().map(|t| t.id + 1).unwrap_or(1);
        let mut turn = Turn::new(role, message);
        turn.id = id;
        turns.push(turn);
        Ok(id)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Turn>, HistoryError> {
        let turns = self.turns.read().await;
        let start = turns.len().saturating_sub(limit);
        Ok(turns[start..].to_vec())
    }

    async fn count(&self) -> Result<u64, HistoryError> {
        Ok(self.turns.read().await.len() as u64)
    }

    async fn close(&self) {}
}
