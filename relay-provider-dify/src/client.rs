//! Dify API client struct and builder.

use std::future::Future;

use relay_types::{ChatStream, Message, ModelDescriptor, Provider, ProviderError};

use crate::config::DifyConfig;
use crate::error::{map_http_status, map_reqwest_error};
use crate::model::model_descriptor;
use crate::query::build_query;
use crate::streaming::stream_chunks;
use crate::types::{ChatMessageRequest, DEFAULT_USER};

/// Path of the chat endpoint under the base URL.
const CHAT_MESSAGES_PATH: &str = "/v1/chat-messages";

/// Client for the Dify chat-messages API.
///
/// Implements [`Provider`] for use anywhere a provider is accepted. Both the
/// base URL and the API key must be set before sending; a missing value
/// fails the call before any request is made.
///
/// # Example
///
/// ```no_run
/// use relay_provider_dify::Dify;
///
/// let client = Dify::new()
///     .base_url("https://api.dify.ai")
///     .api_key("app-...");
/// ```
pub struct Dify {
    /// Base URL, API key, and end-user identifier.
    pub(crate) config: DifyConfig,
    /// Shared HTTP client. No timeout is configured.
    pub(crate) client: reqwest::Client,
}

impl Dify {
    /// Create an unconfigured client.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(DifyConfig::default())
    }

    /// Create a client from stored configuration.
    #[must_use]
    pub fn from_config(config: DifyConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from `DIFY_BASE_URL`, `DIFY_API_KEY` and `DIFY_USER`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(DifyConfig::from_env())
    }

    /// Set the base URL of the Dify deployment.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the app API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Override the end-user identifier sent with each request.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = Some(user.into());
        self
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, timeouts).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &DifyConfig {
        &self.config
    }

    /// Mutable access to the configuration, e.g. for
    /// [`DifyConfig::set_field`].
    pub fn config_mut(&mut self) -> &mut DifyConfig {
        &mut self.config
    }

    /// Build the chat endpoint URL for a validated base URL.
    pub(crate) fn chat_url(base_url: &str) -> String {
        format!("{base_url}{CHAT_MESSAGES_PATH}")
    }
}

impl Default for Dify {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Dify {
    /// Send a conversation to the Dify chat-messages API.
    ///
    /// The conversation is flattened into one `query`, sent with
    /// `response_mode: "streaming"`, and the returned [`ChatStream`] yields
    /// the `answer` fragments of `message` events as they arrive.
    fn create_message(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> impl Future<Output = Result<ChatStream, ProviderError>> + Send {
        let credentials = self.config.credentials();
        let query = build_query(system_prompt, messages);
        let user = self
            .config
            .user
            .clone()
            .unwrap_or_else(|| DEFAULT_USER.to_string());
        let http_client = self.client.clone();

        async move {
            let credentials = credentials?;
            let url = Self::chat_url(&credentials.base_url);
            let body = ChatMessageRequest::streaming(query, user);

            tracing::debug!(url = %url, query_len = body.query.len(), "sending streaming chat request to Dify");

            let response = http_client
                .post(&url)
                .bearer_auth(&credentials.api_key)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(map_reqwest_error)?;

            let status = response.status();
            if !status.is_success() {
                tracing::debug!(status = status.as_u16(), "Dify returned non-success status");
                return Err(map_http_status(&response));
            }

            // Only null-body statuses lack a body; an empty 200 ends naturally.
            if status == reqwest::StatusCode::NO_CONTENT
                || status == reqwest::StatusCode::RESET_CONTENT
            {
                return Err(ProviderError::Protocol(
                    "no response body from Dify API".into(),
                ));
            }

            Ok(stream_chunks(response))
        }
    }

    fn model(&self) -> ModelDescriptor {
        model_descriptor()
    }
}
