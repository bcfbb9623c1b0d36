//! Conversation history storage for Genius.

pub mod cache;
pub mod in_memory;
pub mod sqlite;

pub use cache::RecencyCache;
pub use in_memory::InMemoryHistory;
pub use sqlite::SqliteHistory;
