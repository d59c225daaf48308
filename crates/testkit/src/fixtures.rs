//! Known-good inputs.

use openai_settings_domain::{FormState, Settings, to_settings};

/// A syntactically valid API key.
pub fn valid_api_key() -> String {
    format!("sk-{}", "T3stK3y0".repeat(6))
}

/// A syntactically valid organization id.
pub fn valid_organization_id() -> String {
    "orgABCDEFGHIJ0123456789".to_string()
}

/// A form that passes validation.
pub fn valid_form() -> FormState {
    FormState {
        api_key: valid_api_key(),
        organization_id: valid_organization_id(),
        model: "gpt-4-turbo".to_string(),
        max_tokens: "2048".to_string(),
        temperature: "0.4".to_string(),
    }
}

/// Settings built from [`valid_form`].
pub fn valid_settings() -> Settings {
    to_settings(&valid_form())
}
