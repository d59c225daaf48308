//! Integration coverage for form validation and persisted-payload checks.

use openai_settings_domain::{
    FormField, FormState, ModelId, default_settings, has_errors, to_form_state, to_settings,
    validate, validate_settings,
};
use serde_json::json;

fn filled_form() -> FormState {
    FormState {
        api_key: format!("sk-{}", "q".repeat(48)),
        organization_id: String::new(),
        model: ModelId::Gpt35Turbo.as_str().to_string(),
        max_tokens: "1024".into(),
        temperature: "0.2".into(),
    }
}

#[test]
fn oversized_token_limit_is_reported() {
    let form = FormState {
        max_tokens: "10000".into(),
        ..filled_form()
    };
    let errors = validate(&form);
    assert!(has_errors(&errors));
    assert_eq!(
        errors.get(FormField::MaxTokens),
        Some("Max tokens must be between 1 and 8192")
    );
}

#[test]
fn hot_temperature_is_reported() {
    let form = FormState {
        temperature: "3.0".into(),
        ..filled_form()
    };
    assert_eq!(
        validate(&form).get(FormField::Temperature),
        Some("Temperature must be between 0 and 2")
    );
}

#[test]
fn normalized_form_passes_revalidation() -> Result<(), Box<dyn std::error::Error>> {
    let settings = to_settings(&filled_form());
    let reloaded = validate_settings(&settings.to_json())?;
    assert_eq!(reloaded, settings);
    assert_eq!(to_form_state(&reloaded), filled_form());
    Ok(())
}

#[test]
fn defaults_render_as_a_form_that_needs_a_key() {
    let form = to_form_state(&default_settings());
    assert_eq!(form.model, "gpt-4o");
    assert_eq!(form.max_tokens, "4096");
    assert_eq!(form.temperature, "0.7");

    let errors = validate(&form);
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(FormField::ApiKey));
}

#[test]
fn revalidation_never_returns_payloads_without_required_fields() {
    for payload in [
        json!({}),
        json!({"apiKey": "sk-live"}),
        json!({"model": "gpt-4o"}),
        json!({"apiKey": null, "model": "gpt-4o"}),
        json!({"apiKey": "sk-live", "model": ""}),
        json!([{"apiKey": "sk-live", "model": "gpt-4o"}]),
    ] {
        assert!(validate_settings(&payload).is_err(), "payload {payload}");
    }
}
