//! Internal error helpers for mapping HTTP/reqwest errors to [`ProviderError`].

use relay_types::ProviderError;

/// Map a non-success HTTP response to a [`ProviderError`].
///
/// The body is not read. The status text is the reason phrase the server
/// sent; hyper only records it when it differs from the canonical one, so
/// the canonical phrase is the fallback.
pub(crate) fn map_http_status(response: &reqwest::Response) -> ProviderError {
    let status = response.status();
    let status_text = response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| status.canonical_reason())
        .unwrap_or_default()
        .to_string();

    ProviderError::Transport {
        status: status.as_u16(),
        status_text,
    }
}

/// Map a [`reqwest::Error`] to a [`ProviderError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_builder() {
        ProviderError::Configuration(format!("invalid request: {err}"))
    } else {
        ProviderError::Network(Box::new(err))
    }
}
