//! API v1 wire-shape tests.

use openai_settings_api::v1::{
    ApiV1FormStateDto, ApiV1LoadResponseDto, ApiV1Result, api_v1_form_state_schema,
    api_v1_settings_schema, connectivity_to_api_v1, error_envelope_to_api_v1_error,
    field_errors_to_api_v1, save_outcome_to_api_v1, settings_to_api_v1,
};
use openai_settings_api::plugin_manifest;
use openai_settings_domain::{
    ConnectivityResult, FormState, SaveOutcome, to_settings, validate,
};
use openai_settings_shared::{ErrorCode, ErrorEnvelope};
use serde_json::json;
use std::error::Error;

fn valid_form_dto() -> ApiV1FormStateDto {
    ApiV1FormStateDto {
        api_key: format!("sk-{}", "A1b2".repeat(12)),
        organization_id: String::new(),
        model: "gpt-4".to_string(),
        max_tokens: "2048".to_string(),
        temperature: "1.2".to_string(),
    }
}

#[test]
fn form_json_validates_into_settings() -> Result<(), Box<dyn Error>> {
    let dto: ApiV1FormStateDto = serde_json::from_value(serde_json::to_value(valid_form_dto())?)?;
    let form = FormState::from(dto);

    let validation = field_errors_to_api_v1(&validate(&form));
    assert_eq!(serde_json::to_value(&validation)?, json!({"valid": true, "errors": {}}));

    let settings = settings_to_api_v1(&to_settings(&form), false);
    assert_eq!(
        serde_json::to_value(&settings)?,
        json!({
            "apiKey": "sk-A1b2...A1b2",
            "apiKeyRevealed": false,
            "model": "gpt-4",
            "maxTokens": 2048,
            "temperature": 1.2
        })
    );
    Ok(())
}

#[test]
fn invalid_form_reports_every_field() -> Result<(), Box<dyn Error>> {
    let form = FormState::from(ApiV1FormStateDto {
        api_key: "sk-short".to_string(),
        organization_id: "org-with-dash".to_string(),
        model: String::new(),
        max_tokens: "9000".to_string(),
        temperature: "hot".to_string(),
    });
    let value = serde_json::to_value(field_errors_to_api_v1(&validate(&form)))?;
    assert_eq!(value["valid"], false);
    let errors = value["errors"].as_object().ok_or("errors should be an object")?;
    let keys: Vec<_> = errors.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["apiKey", "maxTokens", "model", "organizationId", "temperature"]
    );
    assert_eq!(errors["organizationId"], "Invalid organization ID format");
    Ok(())
}

#[test]
fn outcome_dtos_match_wire_shapes() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        serde_json::to_value(ApiV1Result::ok(save_outcome_to_api_v1(&SaveOutcome::saved_locally())))?,
        json!({"ok": true, "data": {"success": true, "message": "Settings saved to local storage"}})
    );
    assert_eq!(
        serde_json::to_value(connectivity_to_api_v1(&ConnectivityResult::succeeded(vec![
            "gpt-4o".to_string(),
            "o1".to_string(),
        ])))?,
        json!({"success": true, "message": "Connection successful", "models": ["gpt-4o", "o1"]})
    );
    Ok(())
}

#[test]
fn error_result_matches_wire_shape() -> Result<(), Box<dyn Error>> {
    let envelope = ErrorEnvelope::expected(
        ErrorCode::new("config", "invalid_timeout"),
        "timeoutMs must be between 1000 and 600000",
    )
    .with_metadata("field", "remote.timeoutMs")
    .with_metadata("authToken", "host-token");
    let result: ApiV1Result<ApiV1LoadResponseDto> =
        ApiV1Result::err(error_envelope_to_api_v1_error(&envelope, None));

    assert_eq!(
        serde_json::to_value(&result)?,
        json!({
            "ok": false,
            "error": {
                "code": "ERR_CONFIG_INVALID_TIMEOUT",
                "message": "timeoutMs must be between 1000 and 600000",
                "kind": "EXPECTED",
                "meta": {"authToken": "[REDACTED]", "field": "remote.timeoutMs"}
            }
        })
    );
    Ok(())
}

#[test]
fn schemas_describe_camel_case_properties() -> Result<(), Box<dyn Error>> {
    let settings = serde_json::to_value(api_v1_settings_schema())?;
    let properties = settings["properties"]
        .as_object()
        .ok_or("settings schema should list properties")?;
    assert!(properties.contains_key("apiKey"));
    assert!(properties.contains_key("maxTokens"));
    let required = settings["required"]
        .as_array()
        .ok_or("settings schema should list required fields")?;
    assert!(required.contains(&json!("model")));
    assert!(!required.contains(&json!("temperature")));

    let form = serde_json::to_value(api_v1_form_state_schema())?;
    assert_eq!(form["additionalProperties"], false);
    assert!(form["properties"]["organizationId"].is_object());
    Ok(())
}

#[test]
fn manifest_serializes_to_host_document() -> Result<(), Box<dyn Error>> {
    let value = serde_json::to_value(plugin_manifest())?;
    assert_eq!(value["plugin"]["plugin_slug"], "BrainDriveOpenAISettings");
    assert_eq!(value["plugin"]["bundle_location"], "dist/remoteEntry.js");
    let module = &value["modules"][0];
    assert_eq!(module["display_name"], "OpenAI Settings");
    assert_eq!(module["config_fields"]["max_tokens"]["max"], 8192);
    assert_eq!(
        module["required_services"]["settings"]["methods"],
        json!(["getSetting", "setSetting", "getSettingDefinitions"])
    );
    assert_eq!(module["messages"]["validation_error"], "Please fix validation errors");
    Ok(())
}
