#![deny(missing_docs)]
//! Dify chat-messages provider for relay.
//!
//! Implements the [`relay_types::Provider`] trait for Dify's
//! `/v1/chat-messages` endpoint in streaming mode. The conversation is
//! flattened into a single query string ([`build_query`]), and the streamed
//! `data:` lines are decoded into text chunks as they arrive.
//!
//! Each call is stateless: no conversation id is carried between calls.

mod client;
pub mod config;
mod error;
pub mod model;
pub mod query;
mod streaming;
pub mod types;

pub use client::Dify;
pub use config::{DifyConfig, SettingsField};
pub use model::{MODEL_ID, model_descriptor};
pub use query::build_query;
