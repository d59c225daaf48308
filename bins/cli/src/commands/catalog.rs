//! Static documents: defaults, model list, manifest, schemas, key display.

use super::settings_lines;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, status_json, status_text, to_json_output};
use crate::{CliOutput, SchemaTarget};
use openai_settings_api::plugin_manifest;
use openai_settings_api::v1::{
    ApiV1ModelOptionDto, api_v1_form_state_schema, api_v1_settings_schema, settings_to_api_v1,
};
use openai_settings_domain::{ModelId, default_settings};
use openai_settings_shared::sanitize_api_key;

/// Print the default settings.
pub fn run_defaults(mode: OutputMode) -> Result<CliOutput, CliError> {
    let dto = settings_to_api_v1(&default_settings(), true);
    let stdout = if mode.is_json() {
        status_json("ok", serde_json::json!({ "settings": dto }))?
    } else {
        status_text("ok", settings_lines(&dto))
    };
    Ok(CliOutput::new(stdout, String::new(), ExitCode::Ok))
}

/// List the allow-listed models with their labels.
pub fn run_models(mode: OutputMode) -> Result<CliOutput, CliError> {
    let options: Vec<ApiV1ModelOptionDto> = ModelId::ALL
        .iter()
        .map(|model| ApiV1ModelOptionDto {
            value: model.as_str().to_string(),
            label: model.label().to_string(),
        })
        .collect();

    let stdout = if mode.is_json() {
        status_json("ok", serde_json::json!({ "models": options }))?
    } else {
        let mut out = String::from("status: ok\nmodels:\n");
        for option in &options {
            out.push_str("  ");
            out.push_str(&option.value);
            out.push_str(": ");
            out.push_str(&option.label);
            out.push('\n');
        }
        out
    };
    Ok(CliOutput::new(stdout, String::new(), ExitCode::Ok))
}

/// Print the plugin manifest.
///
/// The manifest is a document consumed by the host, so both output modes
/// print it as bare JSON.
pub fn run_manifest() -> Result<CliOutput, CliError> {
    let stdout = to_json_output(&plugin_manifest())?;
    Ok(CliOutput::new(stdout, String::new(), ExitCode::Ok))
}

/// Print a JSON Schema document (bare JSON in both modes).
pub fn run_schema(target: SchemaTarget) -> Result<CliOutput, CliError> {
    let schema = match target {
        SchemaTarget::Settings => api_v1_settings_schema(),
        SchemaTarget::Form => api_v1_form_state_schema(),
    };
    let stdout = to_json_output(&schema)?;
    Ok(CliOutput::new(stdout, String::new(), ExitCode::Ok))
}

pub fn run_sanitize_key(mode: OutputMode, key: &str) -> Result<CliOutput, CliError> {
    let sanitized = sanitize_api_key(key);
    let stdout = if mode.is_json() {
        status_json("ok", serde_json::json!({ "sanitized": sanitized }))?
    } else {
        status_text("ok", [("sanitized", sanitized)])
    };
    Ok(CliOutput::new(stdout, String::new(), ExitCode::Ok))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;

    const JSON: OutputMode = OutputMode {
        format: OutputFormat::Json,
        no_progress: true,
    };
    const TEXT: OutputMode = OutputMode {
        format: OutputFormat::Text,
        no_progress: true,
    };

    #[test]
    fn defaults_reveal_the_empty_key() -> Result<(), Box<dyn std::error::Error>> {
        let output = run_defaults(JSON)?;
        let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
        assert_eq!(value["settings"]["model"], "gpt-4o");
        assert_eq!(value["settings"]["maxTokens"], 4096);
        assert_eq!(value["settings"]["apiKey"], "");
        assert!(value["settings"].get("organizationId").is_none());
        Ok(())
    }

    #[test]
    fn models_text_lists_every_option() -> Result<(), CliError> {
        let output = run_models(TEXT)?;
        for model in ModelId::ALL {
            let line = format!("  {}: {}\n", model.as_str(), model.label());
            assert!(output.stdout.contains(&line), "missing {line}");
        }
        Ok(())
    }

    #[test]
    fn sanitize_key_text() -> Result<(), CliError> {
        let output = run_sanitize_key(TEXT, "sk-abcdefghijklmnop")?;
        assert_eq!(output.stdout, "status: ok\nsanitized: sk-abcd...mnop\n");
        Ok(())
    }

    #[test]
    fn schema_targets_differ() -> Result<(), Box<dyn std::error::Error>> {
        let settings: serde_json::Value =
            serde_json::from_str(&run_schema(SchemaTarget::Settings)?.stdout)?;
        let form: serde_json::Value =
            serde_json::from_str(&run_schema(SchemaTarget::Form)?.stdout)?;
        assert!(settings["properties"].get("apiKeyRevealed").is_some());
        assert!(form["properties"].get("apiKeyRevealed").is_none());
        Ok(())
    }
}
