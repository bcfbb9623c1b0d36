//! Context window policy — sizes the history window from input complexity.
//!
//! Complexity is approximated by whitespace-delimited word count. Longer,
//! more involved inputs get a wider window of recent turns; short inputs
//! stay at the configured default.

use tracing::debug;

/// Window for complex inputs (more than 20 words).
const COMPLEX_WINDOW: usize = 10;

/// Window for medium-complexity inputs (more than 10 words).
const MEDIUM_WINDOW: usize = 7;

/// Word count above which an input is considered complex.
const COMPLEX_THRESHOLD: usize = 20;

/// Word count above which an input is considered medium complexity.
const MEDIUM_THRESHOLD: usize = 10;

/// Decides how many trailing turns of history to expose per turn.
///
/// `current_window` always reflects the most recently evaluated input and is
/// kept for introspection; the value returned by [`WindowPolicy::decide`] is
/// authoritative for the current turn.
#[derive(Debug, Clone)]
pub struct WindowPolicy {
    default_window: usize,
    current_window: usize,
}

impl WindowPolicy {
    /// Create a policy with the given default window.
    pub fn new(default_window: usize) -> Self {
        Self {
            default_window,
            current_window: default_window,
        }
    }

    /// Decide the window size for `user_input`.
    ///
    /// Deterministic and total: strict `>` comparisons on the word count,
    /// and empty input falls into the default branch.
    pub fn decide(&mut self, user_input: &str) -> usize {
        let words = user_input.split_whitespace().count();
        let window = if words > COMPLEX_THRESHOLD {
            COMPLEX_WINDOW
        } else if words > MEDIUM_THRESHOLD {
            MEDIUM_WINDOW
        } else {
            self.default_window
        };

        debug!(words, window, "Window policy decision");
        self.current_window = window;
        window
    }

    /// Manually override the current window.
    ///
    /// Note: the reference conversation loop calls [`WindowPolicy::decide`]
    /// unconditionally on every turn, so a manual override only holds until
    /// the next `decide` call — it is effectively transient. Callers that
    /// need a persistent override must not call `decide` afterward.
    pub fn set_window(&mut self, window: usize) {
        self.current_window = window;
    }

    /// The window chosen by the most recent `decide` (or `set_window`).
    pub fn current_window(&self) -> usize {
        self.current_window
    }

    /// The configured default window.
    pub fn default_window(&self) -> usize {
        self.default_window
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn complex_input_widens_the_window() {
        let mut policy = WindowPolicy::default();
        assert_eq!(policy.decide(&words(21)), 10);
        assert_eq!(policy.decide(&words(40)), 10);
    }

    #[test]
    fn medium_input_gets_seven() {
        let mut policy = WindowPolicy::default();
        assert_eq!(policy.decide(&words(11)), 7);
        assert_eq!(policy.decide(&words(20)), 7);
    }

    #[test]
    fn simple_input_gets_the_default() {
        let mut policy = WindowPolicy::default();
        assert_eq!(policy.decide(&words(10)), 5);
        assert_eq!(policy.decide(&words(1)), 5);
    }

    #[test]
    fn empty_input_falls_into_default_branch() {
        let mut policy = WindowPolicy::default();
        assert_eq!(policy.decide(""), 5);
        assert_eq!(policy.decide("   "), 5);
    }

    #[test]
    fn decide_is_deterministic() {
        let mut policy = WindowPolicy::default();
        let input = words(15);
        let first = policy.decide(&input);
        let second = policy.decide(&input);
        assert_eq!(first, second);
    }

    #[test]
    fn configured_default_is_respected() {
        let mut policy = WindowPolicy::new(3);
        assert_eq!(policy.decide("short question"), 3);
        assert_eq!(policy.default_window(), 3);
    }

    #[test]
    fn decide_updates_current_window() {
        let mut policy = WindowPolicy::default();
        policy.decide(&words(25));
        assert_eq!(policy.current_window(), 10);
    }

    #[test]
    fn manual_override_is_transient() {
        let mut policy = WindowPolicy::default();
        policy.set_window(42);
        assert_eq!(policy.current_window(), 42);

        // The next decide takes precedence over the override
        policy.decide("hi");
        assert_eq!(policy.current_window(), 5);
    }
}
