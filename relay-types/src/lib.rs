#![deny(missing_docs)]
//! Shared vocabulary for relay chat adapters.
//!
//! Provides the [`Provider`] trait for sending a conversation to a remote
//! chat backend, the [`ChatStream`] it answers with, and the message,
//! capability, and error types every adapter speaks.

pub mod error;
pub mod provider;
pub mod stream;
pub mod types;

// Re-exports
pub use error::ProviderError;
pub use provider::Provider;
pub use stream::{ChatStream, StreamChunk};
pub use types::*;
