//! Streaming support for the Dify chat-messages API.
//!
//! The response body is a sequence of lines. Lines carrying an event start
//! with `data: ` and hold either a JSON record or the `[DONE]` sentinel:
//!
//! ```text
//! data: {"event":"message","answer":"Hel","conversation_id":"..."}
//!
//! data: {"event":"message","answer":"lo"}
//!
//! data: {"event":"message_end","conversation_id":"..."}
//!
//! data: [DONE]
//! ```
//!
//! Only `message` events with a non-empty `answer` produce output. Anything
//! else, including records that fail to decode, is skipped.

use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use relay_types::{ChatStream, ProviderError, StreamChunk};

use crate::types::ChatEvent;

/// Prefix marking an event line.
const DATA_PREFIX: &str = "data: ";

/// Payload that ends the stream successfully.
const DONE_SENTINEL: &str = "[DONE]";

/// Wrap an HTTP response body into a [`ChatStream`].
pub(crate) fn stream_chunks(response: reqwest::Response) -> ChatStream {
    ChatStream::new(parse_event_stream(response.bytes_stream()))
}

/// Parse a raw byte stream into a stream of [`StreamChunk`]s.
///
/// Ends after the `[DONE]` sentinel, at the natural end of the body, or after
/// yielding a single `Err` for a read failure. The body is owned by a
/// [`ResponseReader`] for the whole loop, so it is released on every one of
/// those paths and when the consumer drops the stream early.
pub(crate) fn parse_event_stream<S, E>(
    byte_stream: S,
) -> impl Stream<Item = Result<StreamChunk, ProviderError>> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    async_stream::stream! {
        let mut reader = ResponseReader::new(byte_stream);
        let mut lines = LineBuffer::default();
        let mut body_ended = false;

        loop {
            while let Some(line) = lines.next_line() {
                match process_line(&line) {
                    LineOutcome::Chunk(chunk) => {
                        yield Ok(chunk);
                    }
                    LineOutcome::Done => {
                        tracing::debug!("received [DONE] sentinel");
                        return;
                    }
                    LineOutcome::Skip => {}
                }
            }

            if body_ended {
                tracing::debug!("response body ended without sentinel");
                return;
            }

            match reader.read().await {
                Some(Ok(bytes)) => lines.push(&bytes),
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "stream read error");
                    yield Err(ProviderError::Network(Box::new(e)));
                    return;
                }
                None => {
                    // A final line without a trailing newline still counts.
                    lines.terminate();
                    body_ended = true;
                }
            }
        }
    }
}

/// What a single stream line means to the consumer.
#[derive(Debug, PartialEq)]
pub(crate) enum LineOutcome {
    /// Emit this chunk.
    Chunk(StreamChunk),
    /// The sentinel was seen; stop reading.
    Done,
    /// Nothing to emit.
    Skip,
}

/// Interpret one complete line of the response body.
pub(crate) fn process_line(line: &str) -> LineOutcome {
    let Some(data) = line.strip_prefix(DATA_PREFIX) else {
        return LineOutcome::Skip;
    };
    let data = data.trim();

    if data == DONE_SENTINEL {
        return LineOutcome::Done;
    }

    match serde_json::from_str::<ChatEvent>(data) {
        Ok(ChatEvent::Message {
            answer: Some(answer),
        }) if !answer.is_empty() => LineOutcome::Chunk(StreamChunk::text(answer)),
        Ok(event) => {
            tracing::trace!(?event, "ignoring event without text");
            LineOutcome::Skip
        }
        Err(e) => {
            tracing::trace!(error = %e, "skipping malformed record");
            LineOutcome::Skip
        }
    }
}

/// Longest unterminated line kept in memory before it is discarded.
const MAX_LINE_BYTES: usize = 1 << 20;

/// Byte-level line splitter.
///
/// Bytes are kept until a `\n` arrives, and only complete lines are decoded.
/// A newline byte never occurs inside a multi-byte UTF-8 sequence, so a
/// character split across network chunks is reassembled before decoding.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    buf: Vec<u8>,
    /// Start of the first line not yet handed out.
    start: usize,
    /// Bytes of `buf` before this index are known to contain no newline.
    scanned: usize,
    /// The pending line overflowed and is dropped up to its newline.
    discarding: bool,
}

impl LineBuffer {
    /// Append raw bytes from the body.
    ///
    /// Lines already handed out are compacted away here, once per push.
    pub(crate) fn push(&mut self, bytes: &[u8]) {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Take the next complete line, without its `\n` or `\r\n` terminator.
    pub(crate) fn next_line(&mut self) -> Option<String> {
        loop {
            let Some(offset) = self.buf[self.scanned..].iter().position(|&b| b == b'\n') else {
                self.scanned = self.buf.len();
                if self.buf.len() - self.start > MAX_LINE_BYTES {
                    tracing::warn!(limit = MAX_LINE_BYTES, "discarding over-long line");
                    self.buf.clear();
                    self.start = 0;
                    self.scanned = 0;
                    self.discarding = true;
                }
                return None;
            };
            let end = self.scanned + offset;
            let mut line = &self.buf[self.start..end];
            self.start = end + 1;
            self.scanned = self.start;

            if std::mem::take(&mut self.discarding) {
                continue;
            }
            if line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            return Some(String::from_utf8_lossy(line).into_owned());
        }
    }

    /// Mark the end of input: any unterminated trailing bytes become a line.
    pub(crate) fn terminate(&mut self) {
        if self.buf.len() > self.start {
            self.buf.push(b'\n');
        }
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.buf.len() == self.start
    }
}

/// Scoped owner of the response body.
///
/// Dropping the reader drops the body, which releases the connection. It is
/// created once per stream and dropped exactly once, whichever way the
/// stream ends.
struct ResponseReader<S> {
    body: Pin<Box<S>>,
    bytes_read: usize,
}

impl<S, E> ResponseReader<S>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    fn new(body: S) -> Self {
        Self {
            body: Box::pin(body),
            bytes_read: 0,
        }
    }

    async fn read(&mut self) -> Option<Result<Bytes, E>> {
        let next = self.body.next().await;
        if let Some(Ok(bytes)) = &next {
            self.bytes_read += bytes.len();
        }
        next
    }
}

impl<S> Drop for ResponseReader<S> {
    fn drop(&mut self) {
        tracing::debug!(bytes_read = self.bytes_read, "released response reader");
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
