//! Conversation flattening.
//!
//! The chat-messages endpoint takes a single `query` string, so the whole
//! conversation is rendered into one transcript:
//!
//! ```text
//! System: You are helpful
//!
//! user: Hi
//! assistant: Hello!
//! user: What is Rust?
//! ```

use relay_types::{Message, MessageContent};

/// Render a system prompt and conversation into a single transcript.
///
/// A non-empty system prompt becomes a leading `System:` line followed by a
/// blank line. Every message contributes one `<role>: <text>` line per text
/// fragment; non-text parts contribute nothing. The result is trimmed.
pub fn build_query(system_prompt: &str, messages: &[Message]) -> String {
    let mut query = String::new();

    if !system_prompt.is_empty() {
        query.push_str("System: ");
        query.push_str(system_prompt);
        query.push_str("\n\n");
    }

    for message in messages {
        let role = message.role.as_str();
        match &message.content {
            MessageContent::Text(text) => push_line(&mut query, role, text),
            MessageContent::Parts(parts) => {
                for text in parts.iter().filter_map(|p| p.as_text()) {
                    push_line(&mut query, role, text);
                }
            }
        }
    }

    query.trim().to_string()
}

fn push_line(query: &mut String, role: &str, text: &str) {
    query.push_str(role);
    query.push_str(": ");
    query.push_str(text);
    query.push('\n');
}
