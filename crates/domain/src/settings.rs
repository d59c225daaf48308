//! The normalized settings record.

use crate::model::DEFAULT_MODEL;
use openai_settings_shared::sanitize_api_key;
use serde::Serialize;
use std::fmt;

/// Smallest accepted `maxTokens`.
pub const MIN_TOKENS_LIMIT: i64 = 1;
/// Largest accepted `maxTokens`.
pub const MAX_TOKENS_LIMIT: i64 = 8192;
/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f64 = 0.0;
/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f64 = 2.0;
/// `maxTokens` used by [`default_settings`].
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Temperature used by [`default_settings`].
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Normalized OpenAI settings.
///
/// `api_key` and `model` are always present. Optional fields are `None` when
/// the source was blank or invalid and are then omitted from the JSON form
/// (never written as `null`).
///
/// Untrusted JSON is read through [`crate::validate_settings`]; there is no
/// `Deserialize` impl.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Provider API key (`sk-...`); may be empty only in defaults.
    pub api_key: String,
    /// Optional organization id sent as `OpenAI-Organization`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Selected model identifier.
    pub model: String,
    /// Completion token limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl Settings {
    /// JSON object form used for persistence and events.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("apiKey".into(), self.api_key.clone().into());
        if let Some(organization_id) = &self.organization_id {
            object.insert("organizationId".into(), organization_id.clone().into());
        }
        object.insert("model".into(), self.model.clone().into());
        if let Some(max_tokens) = self.max_tokens {
            object.insert("maxTokens".into(), max_tokens.into());
        }
        if let Some(temperature) = self.temperature.and_then(serde_json::Number::from_f64) {
            object.insert("temperature".into(), serde_json::Value::Number(temperature));
        }
        serde_json::Value::Object(object)
    }

    /// Returns true when an API key has been entered.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Settings")
            .field("api_key", &sanitize_api_key(&self.api_key))
            .field("organization_id", &self.organization_id)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Fixed defaults: empty key, no organization, `gpt-4o`, 4096 tokens, 0.7.
#[must_use]
pub fn default_settings() -> Settings {
    Settings {
        api_key: String::new(),
        organization_id: None,
        model: DEFAULT_MODEL.as_str().to_string(),
        max_tokens: Some(DEFAULT_MAX_TOKENS),
        temperature: Some(DEFAULT_TEMPERATURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_plugin_defaults() {
        let defaults = default_settings();
        assert!(!defaults.has_api_key());
        assert_eq!(defaults.organization_id, None);
        assert_eq!(defaults.model, "gpt-4o");
        assert_eq!(defaults.max_tokens, Some(4096));
        assert_eq!(defaults.temperature, Some(0.7));
    }

    #[test]
    fn json_omits_absent_optionals() {
        let settings = Settings {
            api_key: "sk-test".into(),
            organization_id: None,
            model: "gpt-4".into(),
            max_tokens: None,
            temperature: None,
        };
        assert_eq!(settings.to_json(), json!({"apiKey": "sk-test", "model": "gpt-4"}));
        assert_eq!(
            serde_json::to_value(&settings).ok(),
            Some(json!({"apiKey": "sk-test", "model": "gpt-4"}))
        );
    }

    #[test]
    fn json_uses_camel_case_names() {
        let value = default_settings().to_json();
        assert_eq!(
            value,
            json!({"apiKey": "", "model": "gpt-4o", "maxTokens": 4096, "temperature": 0.7})
        );
    }

    #[test]
    fn debug_output_hides_the_key() {
        let settings = Settings {
            api_key: format!("sk-{}", "Z".repeat(48)),
            ..default_settings()
        };
        let rendered = format!("{settings:?}");
        assert!(rendered.contains("sk-ZZZZ...ZZZZ"));
        assert!(!rendered.contains(&"Z".repeat(10)));
    }
}
