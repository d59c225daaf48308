//! Raw form input, field validation, and normalization.
//!
//! The form keeps every field as the string the user typed. [`validate`]
//! reports per-field messages; [`to_settings`] and [`to_form_state`] convert
//! between the raw and normalized shapes and never fail.

use crate::model::DEFAULT_MODEL;
use crate::settings::{
    MAX_TEMPERATURE, MAX_TOKENS_LIMIT, MIN_TEMPERATURE, MIN_TOKENS_LIMIT, Settings,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const API_KEY_PREFIX: &str = "sk-";
const API_KEY_BODY_LEN: usize = 48;
const ORGANIZATION_ID_MIN_LEN: usize = 20;

/// Message for a blank API key.
pub const API_KEY_REQUIRED: &str = "API key is required";
/// Message for a malformed API key.
pub const API_KEY_INVALID: &str =
    "Invalid API key format. Expected \"sk-\" followed by 48 alphanumeric characters";
/// Message for a malformed organization id.
pub const ORGANIZATION_ID_INVALID: &str = "Invalid organization ID format";
/// Message for a blank model.
pub const MODEL_REQUIRED: &str = "Model selection is required";
/// Message for a non-numeric or out-of-range token limit.
pub const MAX_TOKENS_OUT_OF_RANGE: &str = "Max tokens must be between 1 and 8192";
/// Message for a non-numeric or out-of-range temperature.
pub const TEMPERATURE_OUT_OF_RANGE: &str = "Temperature must be between 0 and 2";

/// Fields that must be valid before a connection test.
pub const CREDENTIAL_FIELDS: [FormField; 2] = [FormField::ApiKey, FormField::OrganizationId];

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    /// API key as typed.
    pub api_key: String,
    /// Organization id as typed.
    pub organization_id: String,
    /// Selected model.
    pub model: String,
    /// Token limit as typed.
    pub max_tokens: String,
    /// Temperature as typed.
    pub temperature: String,
}

impl FormState {
    /// Borrow the raw value of one field.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ApiKey => &self.api_key,
            FormField::OrganizationId => &self.organization_id,
            FormField::Model => &self.model,
            FormField::MaxTokens => &self.max_tokens,
            FormField::Temperature => &self.temperature,
        }
    }

    /// Replace the raw value of one field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::ApiKey => &mut self.api_key,
            FormField::OrganizationId => &mut self.organization_id,
            FormField::Model => &mut self.model,
            FormField::MaxTokens => &mut self.max_tokens,
            FormField::Temperature => &mut self.temperature,
        };
        *slot = value.into();
    }
}

/// Form field names, ordered as the form renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// `apiKey`
    ApiKey,
    /// `organizationId`
    OrganizationId,
    /// `model`
    Model,
    /// `maxTokens`
    MaxTokens,
    /// `temperature`
    Temperature,
}

impl FormField {
    /// Every field, in render order.
    pub const ALL: [Self; 5] = [
        Self::ApiKey,
        Self::OrganizationId,
        Self::Model,
        Self::MaxTokens,
        Self::Temperature,
    ];

    /// camelCase field name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "apiKey",
            Self::OrganizationId => "organizationId",
            Self::Model => "model",
            Self::MaxTokens => "maxTokens",
            Self::Temperature => "temperature",
        }
    }

    /// Accepts the camelCase or `snake_case` spelling.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "apiKey" | "api_key" => Some(Self::ApiKey),
            "organizationId" | "organization_id" => Some(Self::OrganizationId),
            "model" => Some(Self::Model),
            "maxTokens" | "max_tokens" => Some(Self::MaxTokens),
            "temperature" => Some(Self::Temperature),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Field-level validation messages; empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    /// Returns true when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for one field, if it failed.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns true when `field` failed.
    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    /// Failing fields and messages in render order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Errors for `fields` only.
    #[must_use]
    pub fn only(&self, fields: &[FormField]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(field, _)| fields.contains(field))
                .map(|(field, message)| (*field, message.clone()))
                .collect(),
        )
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Validate every field of `form`.
///
/// Blank checks ignore surrounding whitespace. The key and organization id
/// patterns must match the raw value in full, so padded credentials are
/// reported as malformed. Numeric fields are parsed after trimming.
#[must_use]
pub fn validate(form: &FormState) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.api_key.trim().is_empty() {
        errors.insert(FormField::ApiKey, API_KEY_REQUIRED);
    } else if !is_valid_api_key(&form.api_key) {
        errors.insert(FormField::ApiKey, API_KEY_INVALID);
    }

    if !form.organization_id.trim().is_empty() && !is_valid_organization_id(&form.organization_id)
    {
        errors.insert(FormField::OrganizationId, ORGANIZATION_ID_INVALID);
    }

    if form.model.trim().is_empty() {
        errors.insert(FormField::Model, MODEL_REQUIRED);
    }

    let max_tokens = form.max_tokens.trim();
    if !max_tokens.is_empty() {
        let in_range = max_tokens
            .parse::<i64>()
            .is_ok_and(|value| (MIN_TOKENS_LIMIT..=MAX_TOKENS_LIMIT).contains(&value));
        if !in_range {
            errors.insert(FormField::MaxTokens, MAX_TOKENS_OUT_OF_RANGE);
        }
    }

    let temperature = form.temperature.trim();
    if !temperature.is_empty() {
        let in_range = parse_finite_f64(temperature)
            .is_some_and(|value| (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&value));
        if !in_range {
            errors.insert(FormField::Temperature, TEMPERATURE_OUT_OF_RANGE);
        }
    }

    errors
}

/// Returns true when `errors` has at least one entry.
#[must_use]
pub fn has_errors(errors: &FieldErrors) -> bool {
    !errors.is_empty()
}

/// Normalize raw input into [`Settings`].
///
/// Strings are trimmed. Optional fields that are blank or do not parse are
/// omitted; range checks are left to [`validate`]. A blank model becomes the
/// default model so the result always names one.
#[must_use]
pub fn to_settings(form: &FormState) -> Settings {
    let model = form.model.trim();
    let organization_id = form.organization_id.trim();

    Settings {
        api_key: form.api_key.trim().to_string(),
        organization_id: (!organization_id.is_empty()).then(|| organization_id.to_string()),
        model: if model.is_empty() {
            DEFAULT_MODEL.as_str().to_string()
        } else {
            model.to_string()
        },
        max_tokens: form.max_tokens.trim().parse::<u32>().ok(),
        temperature: parse_finite_f64(form.temperature.trim()),
    }
}

/// Render [`Settings`] back into raw form strings.
///
/// Missing optionals become empty strings; numbers use their shortest
/// decimal form, so `"0007"` comes back as `"7"`.
#[must_use]
pub fn to_form_state(settings: &Settings) -> FormState {
    FormState {
        api_key: settings.api_key.clone(),
        organization_id: settings.organization_id.clone().unwrap_or_default(),
        model: settings.model.clone(),
        max_tokens: settings
            .max_tokens
            .map(|value| value.to_string())
            .unwrap_or_default(),
        temperature: settings
            .temperature
            .map(|value| value.to_string())
            .unwrap_or_default(),
    }
}

/// `sk-` followed by exactly 48 ASCII alphanumerics.
#[must_use]
pub fn is_valid_api_key(value: &str) -> bool {
    value.strip_prefix(API_KEY_PREFIX).is_some_and(|body| {
        body.len() == API_KEY_BODY_LEN && body.bytes().all(|byte| byte.is_ascii_alphanumeric())
    })
}

/// At least 20 ASCII alphanumerics and nothing else.
#[must_use]
pub fn is_valid_organization_id(value: &str) -> bool {
    value.len() >= ORGANIZATION_ID_MIN_LEN && value.bytes().all(|byte| byte.is_ascii_alphanumeric())
}

fn parse_finite_f64(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}
