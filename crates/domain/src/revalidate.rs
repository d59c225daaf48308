//! Defensive revalidation of persisted or remote settings payloads.

use crate::model::ModelId;
use crate::settings::Settings;
use openai_settings_shared::{ErrorCode, ErrorEnvelope};
use serde_json::Value;

/// Why a persisted payload was rejected.
///
/// On load every variant means the payload is absent and only feeds debug
/// logs. On save it is the reason the record is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSettings {
    /// Payload is not a JSON object.
    #[error("settings payload must be a JSON object")]
    NotAnObject,
    /// `apiKey` missing, blank, or not a string.
    #[error("settings payload has no apiKey")]
    MissingApiKey,
    /// `model` missing or not a string.
    #[error("settings payload has no model")]
    MissingModel,
    /// `model` is not in the allow-list.
    #[error("settings payload names unsupported model `{model}`")]
    UnsupportedModel {
        /// Rejected model identifier.
        model: String,
    },
}

impl From<InvalidSettings> for ErrorEnvelope {
    fn from(error: InvalidSettings) -> Self {
        let envelope = Self::invariant(
            ErrorCode::new("domain", "invalid_settings"),
            error.to_string(),
        );
        match error {
            InvalidSettings::UnsupportedModel { model } => envelope.with_metadata("model", model),
            _ => envelope,
        }
    }
}

/// Rebuild [`Settings`] from untrusted JSON.
///
/// `apiKey` must be a non-empty string and `model` an allow-listed string.
/// Optional fields survive only when already of the right JSON type:
/// `organizationId` a non-empty string, `maxTokens` an integer that fits
/// `u32`, `temperature` any number. Unknown fields are dropped.
pub fn validate_settings(raw: &Value) -> Result<Settings, InvalidSettings> {
    let object = raw.as_object().ok_or(InvalidSettings::NotAnObject)?;

    let api_key = object
        .get("apiKey")
        .and_then(Value::as_str)
        .filter(|key| !key.trim().is_empty())
        .ok_or(InvalidSettings::MissingApiKey)?;

    let model = object
        .get("model")
        .and_then(Value::as_str)
        .ok_or(InvalidSettings::MissingModel)?;
    if !ModelId::is_allowed(model) {
        return Err(InvalidSettings::UnsupportedModel {
            model: model.to_string(),
        });
    }

    let organization_id = object
        .get("organizationId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let max_tokens = object
        .get("maxTokens")
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok());
    let temperature = object.get("temperature").and_then(Value::as_f64);

    Ok(Settings {
        api_key: api_key.to_string(),
        organization_id,
        model: model.to_string(),
        max_tokens,
        temperature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_complete_payload_and_drops_unknown_fields() -> Result<(), InvalidSettings> {
        let settings = validate_settings(&json!({
            "apiKey": "sk-live",
            "organizationId": "abcdefghij0123456789",
            "model": "gpt-4o-mini",
            "maxTokens": 2048,
            "temperature": 1.2,
            "theme": "dark"
        }))?;
        assert_eq!(settings.api_key, "sk-live");
        assert_eq!(settings.organization_id.as_deref(), Some("abcdefghij0123456789"));
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.max_tokens, Some(2048));
        assert_eq!(settings.temperature, Some(1.2));
        assert!(settings.to_json().get("theme").is_none());
        Ok(())
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        assert_eq!(
            validate_settings(&json!({"model": "gpt-4"})),
            Err(InvalidSettings::MissingApiKey)
        );
        assert_eq!(
            validate_settings(&json!({"apiKey": "  ", "model": "gpt-4"})),
            Err(InvalidSettings::MissingApiKey)
        );
        assert_eq!(
            validate_settings(&json!({"apiKey": "sk-live"})),
            Err(InvalidSettings::MissingModel)
        );
        assert_eq!(
            validate_settings(&json!({"apiKey": "sk-live", "model": 4})),
            Err(InvalidSettings::MissingModel)
        );
        assert_eq!(validate_settings(&json!("sk-live")), Err(InvalidSettings::NotAnObject));
        assert_eq!(validate_settings(&Value::Null), Err(InvalidSettings::NotAnObject));
    }

    #[test]
    fn unknown_model_is_rejected() {
        let result = validate_settings(&json!({"apiKey": "sk-live", "model": "davinci-002"}));
        assert!(matches!(result, Err(InvalidSettings::UnsupportedModel { .. })));

        let envelope: Option<ErrorEnvelope> = result.err().map(Into::into);
        assert_eq!(
            envelope.and_then(|error| error.metadata.get("model").cloned()),
            Some("davinci-002".to_string())
        );
    }

    #[test]
    fn stringly_typed_numbers_are_dropped() -> Result<(), InvalidSettings> {
        let settings = validate_settings(&json!({
            "apiKey": "sk-live",
            "model": "gpt-4",
            "maxTokens": "4096",
            "temperature": "0.7",
            "organizationId": 42
        }))?;
        assert_eq!(settings.max_tokens, None);
        assert_eq!(settings.temperature, None);
        assert_eq!(settings.organization_id, None);
        Ok(())
    }

    #[test]
    fn negative_or_fractional_token_limits_are_dropped() -> Result<(), InvalidSettings> {
        for raw in [json!(-1), json!(12.5), json!(u64::MAX)] {
            let settings = validate_settings(&json!({
                "apiKey": "sk-live",
                "model": "gpt-4",
                "maxTokens": raw,
            }))?;
            assert_eq!(settings.max_tokens, None);
        }
        Ok(())
    }
}
