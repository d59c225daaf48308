//! Error envelope fixtures matching what the real adapters produce.

use openai_settings_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Remote settings API answered 503.
pub fn remote_unavailable_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::new("remote", "http_status"),
        "settings api returned HTTP 503",
        ErrorClass::Retriable,
    )
    .with_metadata("status", "503")
}

/// Local storage write failed.
pub fn storage_write_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::new("storage", "write_failed"),
        "failed to write settings.json: No space left on device (os error 28)",
        ErrorClass::NonRetriable,
    )
}

/// Provider rejected the credentials.
pub fn api_error(message: &str, status: u16) -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::new("connectivity", "api_error"), message)
        .with_metadata("status", status.to_string())
}

/// Network failure before any response.
pub fn transport_error(message: &str) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::new("connectivity", "transport"),
        message,
        ErrorClass::Retriable,
    )
}
