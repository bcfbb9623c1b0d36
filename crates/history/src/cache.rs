//! Recency cache — a memoized single-slot view of the most recent turns.
//!
//! This is deliberately NOT a general LRU: there is exactly one conversation
//! and exactly one limit ever requested from the store (the ceiling), so the
//! cache holds a single entry. Narrower context windows are produced by
//! truncating the cached result downstream, never by separate cache entries.
//!
//! The cache owns the store handle. Writes go through [`RecencyCache::append`],
//! which invalidates the slot synchronously before returning — no reader can
//! observe a write that the cache has not yet reflected.

use genius_core::error::HistoryError;
use genius_core::history::HistoryStore;
use genius_core::turn::{Role, Turn};
use std::sync::Arc;
use tracing::debug;

struct CachedWindow {
    limit: usize,
    turns: Vec<Turn>,
}

/// A single-slot cache over a [`HistoryStore`].
pub struct RecencyCache {
    store: Arc<dyn HistoryStore>,
    slot: Option<CachedWindow>,
}

impl RecencyCache {
    /// Create an empty cache over `store`.
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store, slot: None }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<dyn HistoryStore> {
        &self.store
    }

    /// Return the `limit` most recent turns, oldest-to-newest.
    ///
    /// Serves from the slot when it is populated for the same `limit`;
    /// otherwise queries the store and fills the slot.
    pub async fn fetch(&mut self, limit: usize) -> Result<Vec<Turn>, HistoryError> {
        if let Some(cached) = &self.slot {
            if cached.limit == limit {
                debug!(limit, "Recency cache hit");
                return Ok(cached.turns.clone());
            }
        }

        debug!(limit, "Recency cache miss, querying store");
        let turns = self.store.recent(limit).await?;

        debug_assert!(
            turns.windows(2).all(|w| w[0].id < w[1].id),
            "cached turns must be strictly id-ordered"
        );

        self.slot = Some(CachedWindow {
            limit,
            turns: turns.clone(),
        });
        Ok(turns)
    }

    /// Unconditionally discard the cached slot.
    ///
    /// Subsequent `fetch` calls re-query the store.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Write-through append: record the turn, then invalidate.
    ///
    /// Invalidation happens before this returns, as part of the same
    /// turn-processing step — there is no window in which a fetch could
    /// observe pre-append contents.
    pub async fn append(&mut self, role: Role, message: &str) -> Result<i64, HistoryError> {
        let id = self.store.append(role, message).await?;
        self.invalidate();
        Ok(id)
    }
}
