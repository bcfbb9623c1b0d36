//! Context assembly — renders a window of history into prompt text.
//!
//! # Determinism
//!
//! Assembly is deterministic: identical inputs always produce identical
//! output. No random or time-dependent logic is used.

use genius_core::turn::Turn;

/// Renders the trailing window of conversation history as plain text.
///
/// Stateless — create one and reuse it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Render the last `window` entries of `turns` as `"<role>: <message>"`
    /// lines, oldest-to-newest.
    ///
    /// If `turns` has fewer than `window` entries, all of them are used.
    /// The result is opaque text for the generator; nothing parses it back.
    pub fn assemble(&self, turns: &[Turn], window: usize) -> String {
        let start = turns.len().saturating_sub(window);
        turns[start..]
            .iter()
            .map(|t| format!("{}: {}", t.role, t.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genius_core::turn::Role;

    fn turn(id: i64, role: Role, message: &str) -> Turn {
        let mut t = Turn::new(role, message);
        t.id = id;
        t
    }

    #[test]
    fn renders_role_prefixed_lines() {
        let turns = vec![
            turn(1, Role::User, "hi"),
            turn(2, Role::Assistant, "hello!"),
        ];
        let out = ContextAssembler::new().assemble(&turns, 10);
        assert_eq!(out, "User: hi\nAssistant: hello!");
    }

    #[test]
    fn takes_only_the_last_window_entries() {
        let turns: Vec<Turn> = (1..=6)
            .map(|i| turn(i, Role::User, &format!("m{i}")))
            .collect();
        let out = ContextAssembler::new().assemble(&turns, 2);
        assert_eq!(out, "User: m5\nUser: m6");
    }

    #[test]
    fn short_history_keeps_every_turn() {
        let turns = vec![turn(1, Role::User, "only one")];
        let out = ContextAssembler::new().assemble(&turns, 5);
        assert_eq!(out, "User: only one");
    }

    #[test]
    fn preserves_chronological_order() {
        let turns = vec![
            turn(1, Role::User, "first"),
            turn(2, Role::Assistant, "second"),
            turn(3, Role::User, "third"),
        ];
        let out = ContextAssembler::new().assemble(&turns, 3);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "User: first");
        assert_eq!(lines[2], "User: third");
    }

    #[test]
    fn empty_history_renders_empty() {
        let out = ContextAssembler::new().assemble(&[], 5);
        assert!(out.is_empty());
    }

    #[test]
    fn zero_window_renders_empty() {
        let turns = vec![turn(1, Role::User, "hi")];
        let out = ContextAssembler::new().assemble(&turns, 0);
        assert!(out.is_empty());
    }
}
