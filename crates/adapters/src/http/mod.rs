//! reqwest-backed adapters and their shared helpers.

#[cfg(feature = "braindrive-api")]
pub mod braindrive;
#[cfg(feature = "openai")]
pub mod openai_models;

use openai_settings_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::time::Duration;

/// Trim a base URL and drop trailing slashes.
pub(crate) fn normalize_base_url(label: &str, value: &str) -> Result<Box<str>> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ErrorEnvelope::expected(
            ErrorCode::invalid_input(),
            format!("{label} base url must be non-empty"),
        ));
    }
    Ok(trimmed.into())
}

/// Build a client with an optional total timeout.
pub(crate) fn build_client(
    namespace: &'static str,
    timeout_ms: Option<u64>,
    headers: reqwest::header::HeaderMap,
) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout_ms) = timeout_ms {
        if timeout_ms == 0 {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "timeout must be greater than zero",
            ));
        }
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }
    builder.build().map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new(namespace, "client_init_failed"),
            format!("failed to build HTTP client: {error}"),
            ErrorClass::NonRetriable,
        )
    })
}

/// Map a transport-level reqwest failure.
///
/// The message is the transport error text as-is; callers surface it as the
/// failure detail.
pub(crate) fn map_transport_error(namespace: &'static str, error: &reqwest::Error) -> ErrorEnvelope {
    let class = if error.is_timeout() || error.is_connect() {
        ErrorClass::Retriable
    } else {
        ErrorClass::NonRetriable
    };
    let mut envelope =
        ErrorEnvelope::unexpected(ErrorCode::new(namespace, "transport"), error.to_string(), class);
    if error.is_timeout() {
        envelope = envelope.with_metadata("timeout", "true");
    }
    if error.is_connect() {
        envelope = envelope.with_metadata("connect", "true");
    }
    envelope
}
