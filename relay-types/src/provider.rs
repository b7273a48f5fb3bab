//! Provider trait for chat backends.
//!
//! The [`Provider`] trait uses RPITIT (return-position `impl Trait` in traits)
//! and is not object-safe. Callers that need several backends are generic
//! over `P: Provider`.

use std::future::Future;

use crate::error::ProviderError;
use crate::stream::ChatStream;
use crate::types::{Message, ModelDescriptor};

/// Chat backend interface.
///
/// Each call is stateless: the full conversation is sent every time and
/// nothing is remembered server-side between calls.
pub trait Provider: Send + Sync {
    /// Send a conversation and stream the response.
    ///
    /// Configuration and transport failures surface as the outer `Err`.
    /// Once the stream is returned, failures while reading arrive as a final
    /// `Err` item.
    fn create_message(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> impl Future<Output = Result<ChatStream, ProviderError>> + Send;

    /// The model identifier and its fixed capabilities.
    fn model(&self) -> ModelDescriptor;
}
