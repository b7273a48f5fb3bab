//! Dify `/v1/chat-messages` request and stream event types.
//!
//! Key differences from OpenAI-compatible APIs:
//! - The conversation is sent as one flattened `query` string, not a message list
//! - No model field: the model is chosen in the Dify app configuration
//! - Streamed events are tagged by an `event` field; text arrives in `answer`

use serde::{Deserialize, Serialize};

/// Static end-user identifier sent when none is configured.
pub const DEFAULT_USER: &str = "cline-user";

/// How the server should deliver the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Incremental `data:` lines.
    Streaming,
}

/// Dify `/v1/chat-messages` request body.
#[derive(Debug, Serialize)]
pub struct ChatMessageRequest {
    /// App input variables. Always empty.
    pub inputs: serde_json::Map<String, serde_json::Value>,
    /// The flattened conversation transcript.
    pub query: String,
    /// Always [`ResponseMode::Streaming`] for this provider.
    pub response_mode: ResponseMode,
    /// Empty: every call starts a new server-side conversation.
    pub conversation_id: String,
    /// End-user identifier.
    pub user: String,
    /// File attachments. Always empty.
    pub files: Vec<serde_json::Value>,
}

impl ChatMessageRequest {
    /// Build a stateless streaming request for `query`.
    pub fn streaming(query: String, user: impl Into<String>) -> Self {
        Self {
            inputs: serde_json::Map::new(),
            query,
            response_mode: ResponseMode::Streaming,
            conversation_id: String::new(),
            user: user.into(),
            files: Vec::new(),
        }
    }
}

/// One decoded `data:` record from the response stream.
///
/// Records without an `event` field, or that are not JSON objects, fail to
/// decode and are skipped by the stream parser.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A fragment of the answer.
    Message {
        /// The text fragment, if any.
        #[serde(default)]
        answer: Option<String>,
    },
    /// The answer is complete.
    MessageEnd,
    /// Keep-alive.
    Ping,
    /// Any other event kind (workflow, agent, file, error events).
    #[serde(other)]
    Other,
}
