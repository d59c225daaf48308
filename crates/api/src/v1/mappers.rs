//! API v1 DTO mapping helpers.

use crate::v1::{
    ApiV1ConnectivityResponseDto, ApiV1ErrorCode, ApiV1ErrorDto, ApiV1ErrorKind, ApiV1ErrorMeta,
    ApiV1FormStateDto, ApiV1Result, ApiV1SaveResponseDto, ApiV1SettingsDto, ApiV1ValidationResponseDto,
};
use openai_settings_domain::{ConnectivityResult, FieldErrors, FormState, SaveOutcome, Settings};
use openai_settings_shared::{ErrorEnvelope, ErrorKind, sanitize_api_key};

const API_V1_REDACTED: &str = "[REDACTED]";
const API_V1_REDACTED_PREFIX: &str = "[REDACTED,len=";

/// Convert a shared `ErrorCode` into an API v1 error code string.
#[must_use]
pub fn error_code_to_api_v1(code: &openai_settings_shared::ErrorCode) -> ApiV1ErrorCode {
    let namespace = sanitize_code_segment(code.namespace());
    let detail = sanitize_code_segment(code.code());
    format!("ERR_{namespace}_{detail}")
}

/// Map an `ErrorEnvelope` into an API v1 error DTO.
#[must_use]
pub fn error_envelope_to_api_v1_error(
    envelope: &ErrorEnvelope,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1ErrorDto {
    let mut merged = ApiV1ErrorMeta::new();
    for (key, value) in &envelope.metadata {
        merged.insert(key.clone(), value.clone());
    }
    if let Some(extra) = extra_meta {
        for (key, value) in extra {
            merged.insert(key, value);
        }
    }
    let meta = if merged.is_empty() {
        None
    } else {
        Some(redact_api_v1_meta(&merged))
    };

    ApiV1ErrorDto {
        code: error_code_to_api_v1(&envelope.code),
        message: envelope.message.clone(),
        kind: map_error_kind(envelope.kind),
        meta,
    }
}

/// Map a shared result into an API v1 result wrapper.
#[must_use]
pub fn result_to_api_v1_result<T>(
    result: Result<T, ErrorEnvelope>,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1Result<T> {
    match result {
        Ok(data) => ApiV1Result::ok(data),
        Err(error) => ApiV1Result::err(error_envelope_to_api_v1_error(&error, extra_meta)),
    }
}

/// Map validation errors into the response DTO.
#[must_use]
pub fn field_errors_to_api_v1(errors: &FieldErrors) -> ApiV1ValidationResponseDto {
    ApiV1ValidationResponseDto {
        valid: errors.is_empty(),
        errors: errors
            .iter()
            .map(|(field, message)| (field.as_str().to_string(), message.to_string()))
            .collect(),
    }
}

/// Map settings into the display DTO; the key stays sanitized unless `reveal_key`.
#[must_use]
pub fn settings_to_api_v1(settings: &Settings, reveal_key: bool) -> ApiV1SettingsDto {
    let api_key = if reveal_key {
        settings.api_key.clone()
    } else {
        sanitize_api_key(&settings.api_key)
    };
    ApiV1SettingsDto {
        api_key,
        api_key_revealed: reveal_key,
        organization_id: settings.organization_id.clone(),
        model: settings.model.clone(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    }
}

/// Map a save outcome into the response DTO.
#[must_use]
pub fn save_outcome_to_api_v1(outcome: &SaveOutcome) -> ApiV1SaveResponseDto {
    ApiV1SaveResponseDto {
        success: outcome.success,
        message: outcome.message.clone(),
    }
}

/// Map a probe result into the response DTO.
#[must_use]
pub fn connectivity_to_api_v1(result: &ConnectivityResult) -> ApiV1ConnectivityResponseDto {
    ApiV1ConnectivityResponseDto {
        success: result.success,
        message: result.message.clone(),
        error: result.error_detail.clone(),
        models: result.available_models.clone(),
    }
}

impl From<ApiV1FormStateDto> for FormState {
    fn from(dto: ApiV1FormStateDto) -> Self {
        Self {
            api_key: dto.api_key,
            organization_id: dto.organization_id,
            model: dto.model,
            max_tokens: dto.max_tokens,
            temperature: dto.temperature,
        }
    }
}

impl From<FormState> for ApiV1FormStateDto {
    fn from(form: FormState) -> Self {
        Self {
            api_key: form.api_key,
            organization_id: form.organization_id,
            model: form.model,
            max_tokens: form.max_tokens,
            temperature: form.temperature,
        }
    }
}

const fn map_error_kind(kind: ErrorKind) -> ApiV1ErrorKind {
    match kind {
        ErrorKind::Expected | ErrorKind::Unexpected => ApiV1ErrorKind::Expected,
        ErrorKind::Invariant => ApiV1ErrorKind::Invariant,
    }
}

fn sanitize_code_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn redact_api_v1_meta(meta: &ApiV1ErrorMeta) -> ApiV1ErrorMeta {
    let mut redacted = ApiV1ErrorMeta::new();
    for (key, value) in meta {
        let redacted_value = if is_secret_key(key) {
            API_V1_REDACTED.to_string()
        } else if is_locator_key(key) {
            format!("{API_V1_REDACTED_PREFIX}{}]", value.len())
        } else {
            value.clone()
        };
        redacted.insert(key.clone(), redacted_value);
    }
    redacted
}

fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("api_key")
        || key.contains("apikey")
        || key.contains("token")
        || key.contains("password")
        || key.contains("secret")
        || key.contains("authorization")
        || key.contains("bearer")
}

fn is_locator_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key == "url" || key.ends_with("url") || key == "body"
}

#[cfg(test)]
mod tests {
    use super::*;
    use openai_settings_domain::{FormState, default_settings, validate};
    use openai_settings_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
    use std::collections::BTreeMap;
    use std::error::Error;

    #[test]
    fn mapping_redacts_sensitive_metadata() -> Result<(), Box<dyn Error>> {
        let envelope = ErrorEnvelope::expected(ErrorCode::new("config", "invalid_url"), "bad url")
            .with_metadata("token", "secret-token")
            .with_metadata("apiKey", "sk-123")
            .with_metadata("baseUrl", "https://user:pw@host")
            .with_metadata("field", "openai.baseUrl");

        let dto = error_envelope_to_api_v1_error(&envelope, None);
        let meta = dto.meta.ok_or("meta should be present")?;
        assert_eq!(dto.code, "ERR_CONFIG_INVALID_URL");
        assert_eq!(dto.kind, ApiV1ErrorKind::Expected);
        assert_eq!(meta.get("token").map(String::as_str), Some("[REDACTED]"));
        assert_eq!(meta.get("apiKey").map(String::as_str), Some("[REDACTED]"));
        assert_eq!(
            meta.get("baseUrl").map(String::as_str),
            Some("[REDACTED,len=20]")
        );
        assert_eq!(meta.get("field").map(String::as_str), Some("openai.baseUrl"));
        Ok(())
    }

    #[test]
    fn unexpected_errors_map_to_expected_kind() {
        let envelope = ErrorEnvelope::unexpected(ErrorCode::io(), "io", ErrorClass::Retriable);
        let dto = error_envelope_to_api_v1_error(&envelope, None);
        assert_eq!(dto.kind, ApiV1ErrorKind::Expected);
    }

    #[test]
    fn result_mapping_preserves_ok_and_err() {
        let ok_result: Result<u32, ErrorEnvelope> = Ok(10);
        let mapped = result_to_api_v1_result(ok_result, None);
        assert!(matches!(mapped, ApiV1Result::Ok { ok: true, .. }));

        let mut extra = BTreeMap::new();
        extra.insert("requestId".to_string(), "abc".to_string());
        let err_result: Result<u32, ErrorEnvelope> = Err(ErrorEnvelope::expected(
            ErrorCode::invalid_input(),
            "bad input",
        ));
        let mapped = result_to_api_v1_result(err_result, Some(extra));
        assert!(matches!(mapped, ApiV1Result::Err { ok: false, .. }));
    }

    #[test]
    fn settings_key_is_sanitized_unless_revealed() {
        let settings = Settings {
            api_key: format!("sk-{}", "a".repeat(44) + "WXYZ"),
            ..default_settings()
        };
        let hidden = settings_to_api_v1(&settings, false);
        assert_eq!(hidden.api_key, "sk-aaaa...WXYZ");
        assert!(!hidden.api_key_revealed);

        let shown = settings_to_api_v1(&settings, true);
        assert_eq!(shown.api_key, settings.api_key);
        assert!(shown.api_key_revealed);
    }

    #[test]
    fn field_errors_keep_camel_case_names() {
        let errors = validate(&FormState {
            max_tokens: "0".to_string(),
            ..FormState::default()
        });
        let dto = field_errors_to_api_v1(&errors);
        assert!(!dto.valid);
        assert_eq!(
            dto.errors.get("apiKey").map(String::as_str),
            Some("API key is required")
        );
        assert!(dto.errors.contains_key("maxTokens"));
    }

    #[test]
    fn connectivity_failure_carries_detail() {
        let dto = connectivity_to_api_v1(&ConnectivityResult::failed("Invalid API key"));
        assert!(!dto.success);
        assert_eq!(dto.message, "Connection failed");
        assert_eq!(dto.error.as_deref(), Some("Invalid API key"));
        assert_eq!(dto.models, None);
    }
}
