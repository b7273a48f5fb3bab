//! Streamed output of a provider call.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// One unit of streamed output, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamChunk {
    /// A fragment of response text.
    Text {
        /// The text fragment.
        text: String,
    },
}

impl StreamChunk {
    /// Create a text chunk.
    pub fn text(text: impl Into<String>) -> Self {
        StreamChunk::Text { text: text.into() }
    }
}

/// Lazily pulled sequence of [`StreamChunk`]s from a single provider call.
///
/// Each chunk is produced only when polled. An `Err` item is terminal: the
/// stream ends after it. Dropping the stream before it ends releases the
/// underlying connection.
pub struct ChatStream {
    /// The boxed chunk stream.
    pub receiver: Pin<Box<dyn Stream<Item = Result<StreamChunk, ProviderError>> + Send>>,
}

impl ChatStream {
    /// Wrap any chunk stream.
    pub fn new(
        stream: impl Stream<Item = Result<StreamChunk, ProviderError>> + Send + 'static,
    ) -> Self {
        Self {
            receiver: Box::pin(stream),
        }
    }
}

impl Stream for ChatStream {
    type Item = Result<StreamChunk, ProviderError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStream").finish_non_exhaustive()
    }
}
