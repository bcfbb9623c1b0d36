//! Turn domain types.
//!
//! A `Turn` is the core value object that flows through the entire system:
//! the user sends a message → the history store records it → the context
//! assembler renders it → the provider generates a reply, which is recorded
//! as the next turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The role of a turn's author in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
}

impl Role {
    /// The storage token for this role (what goes into the database).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A single recorded turn in the conversation.
///
/// Immutable once created — turns are never updated or deleted. The history
/// store exclusively owns the canonical sequence; everything else holds
/// read-only copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Monotonically increasing id, assigned by the store on append
    pub id: i64,

    /// Who authored this turn
    pub role: Role,

    /// The text content
    pub message: String,

    /// When this turn was recorded
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a turn that has not yet been assigned an id by a store.
    ///
    /// Used by in-memory stores and tests; durable stores assign the id
    /// themselves on insert.
    pub fn new(role: Role, message: impl Into<String>) -> Self {
        Self {
            id: 0,
            role,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_is_capitalized() {
        assert_eq!(Role::User.to_string(), "User");
        assert_eq!(Role::Assistant.to_string(), "Assistant");
    }

    #[test]
    fn role_storage_token_is_lowercase() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!(Role::from_str("user").unwrap(), Role::User);
        assert_eq!(Role::from_str("User").unwrap(), Role::User);
        assert_eq!(Role::from_str("ASSISTANT").unwrap(), Role::Assistant);
        assert!(Role::from_str("system").is_err());
    }

    #[test]
    fn turn_serialization_roundtrip() {
        let turn = Turn {
            id: 42,
            role: Role::Assistant,
            message: "Hello there".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&turn).unwrap();
        let parsed: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, 42);
        assert_eq!(parsed.role, Role::Assistant);
        assert_eq!(parsed.message, "Hello there");
    }

    #[test]
    fn role_serde_uses_lowercase() {
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, "\"user\"");
    }
}
