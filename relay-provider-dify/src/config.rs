//! Adapter configuration.
//!
//! Two fields are required before a message can be sent: the base URL of the
//! Dify deployment and an app API key. Settings UIs update them one field at
//! a time through [`DifyConfig::set_field`]; everything else reads them as a
//! plain struct.

use std::str::FromStr;

use relay_types::ProviderError;
use serde::{Deserialize, Serialize};

/// Environment variable holding the base URL.
pub const BASE_URL_ENV: &str = "DIFY_BASE_URL";
/// Environment variable holding the app API key.
pub const API_KEY_ENV: &str = "DIFY_API_KEY";
/// Environment variable overriding the end-user identifier.
pub const USER_ENV: &str = "DIFY_USER";

/// Stored configuration for the Dify adapter.
///
/// Fields are optional because settings are filled in incrementally;
/// [`DifyConfig::credentials`] enforces that both are present at send time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifyConfig {
    /// Origin of the Dify deployment, e.g. `https://api.dify.ai`.
    #[serde(default, alias = "difyBaseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// App API key, sent as a bearer token.
    #[serde(default, alias = "difyApiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// End-user identifier. Defaults to [`crate::types::DEFAULT_USER`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// A settings key that can be updated through [`DifyConfig::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    /// The base URL.
    BaseUrl,
    /// The API key.
    ApiKey,
}

impl FromStr for SettingsField {
    type Err = ProviderError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "baseUrl" | "difyBaseUrl" => Ok(SettingsField::BaseUrl),
            "apiKey" | "difyApiKey" => Ok(SettingsField::ApiKey),
            other => Err(ProviderError::Configuration(format!(
                "unknown settings field: {other}"
            ))),
        }
    }
}

/// Validated credentials for one request.
#[derive(Clone)]
pub(crate) struct Credentials {
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl DifyConfig {
    /// Read configuration from `DIFY_BASE_URL`, `DIFY_API_KEY` and `DIFY_USER`.
    ///
    /// Unset variables leave the matching field empty; nothing is validated
    /// until a message is sent.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: non_empty(lookup(BASE_URL_ENV)),
            api_key: non_empty(lookup(API_KEY_ENV)),
            user: non_empty(lookup(USER_ENV)),
        }
    }

    /// Update a single field. An empty value clears it.
    pub fn set_field(&mut self, field: SettingsField, value: impl Into<String>) {
        let value = non_empty(Some(value.into()));
        match field {
            SettingsField::BaseUrl => self.base_url = value,
            SettingsField::ApiKey => self.api_key = value,
        }
    }

    /// Update a field by its settings key (`baseUrl`, `apiKey`, or the
    /// `difyBaseUrl` / `difyApiKey` storage keys).
    pub fn set_field_by_key(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let field = key.parse::<SettingsField>()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Both credentials, or a configuration error naming what is missing.
    pub(crate) fn credentials(&self) -> Result<Credentials, ProviderError> {
        let api_key = self.api_key.as_deref().map(str::trim).unwrap_or_default();
        let base_url = self.base_url.as_deref().map(str::trim).unwrap_or_default();

        match (api_key.is_empty(), base_url.is_empty()) {
            (true, true) => Err(ProviderError::Configuration(
                "Dify API key and base URL are required".into(),
            )),
            (true, false) => Err(ProviderError::Configuration(
                "Dify API key is required".into(),
            )),
            (false, true) => Err(ProviderError::Configuration(
                "Dify base URL is required".into(),
            )),
            (false, false) => Ok(Credentials {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
            }),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
