//! Prompt template — the final text handed to the generator.
//!
//! The template is explicit configuration passed in at construction time
//! (no process-wide singleton), so tests can substitute a trivial one.

/// The assistant's built-in persona prompt.
const DEFAULT_TEMPLATE: &str = r#"You are GENIUS (General Expert Navigator for Intelligent User Support), a helpful conversational assistant.

You can process nuanced, multi-part questions and provide detailed, context-aware answers; break problems down step by step; write and brainstorm in any style or tone; and offer tailored recommendations based on the conversation so far.

Here is the context of our conversation so far:
{context}

Your last input: {user_input}

What can I help you with today?"#;

/// A prompt template with `{context}` and `{user_input}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a template from the given text.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the template by substituting both placeholders. Pure.
    pub fn render(&self, context: &str, user_input: &str) -> String {
        self.template
            .replace("{context}", context)
            .replace("{user_input}", user_input)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_both_placeholders() {
        let template = PromptTemplate::new("ctx: {context} | input: {user_input}");
        let out = template.render("User: hi", "how are you?");
        assert_eq!(out, "ctx: User: hi | input: how are you?");
    }

    #[test]
    fn default_template_carries_the_persona() {
        let out = PromptTemplate::default().render("User: hi", "hello");
        assert!(out.contains("GENIUS"));
        assert!(out.contains("User: hi"));
        assert!(out.contains("Your last input: hello"));
        assert!(!out.contains("{context}"));
        assert!(!out.contains("{user_input}"));
    }

    #[test]
    fn empty_context_renders_cleanly() {
        let template = PromptTemplate::new("[{context}] {user_input}");
        assert_eq!(template.render("", "hi"), "[] hi");
    }
}
