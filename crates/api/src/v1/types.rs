//! API v1 DTO types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error kind exposed in API v1 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiV1ErrorKind {
    /// Expected, user-facing errors (bad input, unreachable hosts).
    Expected,
    /// Invariant violations that indicate a bug.
    Invariant,
}

/// API v1 error code string (stable contract value).
pub type ApiV1ErrorCode = String;

/// Metadata map attached to API v1 errors.
pub type ApiV1ErrorMeta = BTreeMap<String, String>;

/// API v1 error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ErrorDto {
    /// Stable error code (e.g. `ERR_CONFIG_INVALID_URL`).
    pub code: ApiV1ErrorCode,
    /// Human-readable message for the caller.
    pub message: String,
    /// Error category.
    pub kind: ApiV1ErrorKind,
    /// Optional metadata for debugging and correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ApiV1ErrorMeta>,
}

/// API v1 result wrapper for success or failure payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiV1Result<T> {
    /// Success response.
    Ok {
        /// Indicates success.
        ok: bool,
        /// Success payload.
        data: T,
    },
    /// Error response.
    Err {
        /// Indicates failure.
        ok: bool,
        /// Error payload.
        error: ApiV1ErrorDto,
    },
}

impl<T> ApiV1Result<T> {
    /// Build a success response wrapper.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self::Ok { ok: true, data }
    }

    /// Build an error response wrapper.
    #[must_use]
    pub const fn err(error: ApiV1ErrorDto) -> Self {
        Self::Err { ok: false, error }
    }
}

/// Raw form input, every field a string.
///
/// Missing fields deserialize as empty strings, matching an untouched form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ApiV1FormStateDto {
    /// API key as typed.
    pub api_key: String,
    /// Organization id as typed (may be empty).
    pub organization_id: String,
    /// Selected model identifier.
    pub model: String,
    /// Token limit as typed.
    pub max_tokens: String,
    /// Temperature as typed.
    pub temperature: String,
}

/// Normalized settings for display or transport.
///
/// `apiKey` holds the sanitized form (`sk-abcd...wxyz`) unless the caller
/// explicitly asked to reveal it; `apiKeyRevealed` says which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1SettingsDto {
    /// API key, sanitized unless revealed.
    pub api_key: String,
    /// True when `api_key` is the full secret.
    pub api_key_revealed: bool,
    /// Optional organization id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Selected model identifier.
    pub model: String,
    /// Completion token limit (1..=8192).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 8192))]
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0..=2.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f64>,
}

/// Result of validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ValidationResponseDto {
    /// True when no field has an error.
    pub valid: bool,
    /// Field name (camelCase) to error message.
    pub errors: BTreeMap<String, String>,
}

/// Result of a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1SaveResponseDto {
    /// Whether either persistence backend accepted the settings.
    pub success: bool,
    /// User-facing outcome message.
    pub message: String,
}

/// Result of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ConnectivityResponseDto {
    /// Whether the provider returned a model list.
    pub success: bool,
    /// Fixed summary message.
    pub message: String,
    /// Error detail on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Model ids in server order on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
}

/// Result of a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1LoadResponseDto {
    /// Loaded settings, absent when nothing valid was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ApiV1SettingsDto>,
    /// Where the settings came from (`remote`, `local`, `defaults`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One entry of the model selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiV1ModelOptionDto {
    /// Model identifier.
    pub value: String,
    /// Display label.
    pub label: String,
}
