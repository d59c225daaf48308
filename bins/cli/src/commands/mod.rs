//! CLI command handlers.

pub mod catalog;
pub mod config;
pub mod connection;
pub mod settings;
pub mod validate;

pub use catalog::{run_defaults, run_manifest, run_models, run_sanitize_key, run_schema};
pub use config::run_config_show;
pub use connection::run_test_connection;
pub use settings::{run_load, run_save};
pub use validate::run_validate;

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, log_info, status_json, status_text};
use clap::Args;
use openai_settings_api::v1::{ApiV1FormStateDto, ApiV1SettingsDto, field_errors_to_api_v1};
use openai_settings_config::ValidatedPluginConfig;
use openai_settings_domain::{FieldErrors, FormField, FormState, default_settings, to_form_state};
use openai_settings_infra::{InfraError, InfraResult};
use std::path::PathBuf;

/// Inputs shared by every command.
pub struct CommandContext {
    pub mode: OutputMode,
    pub config_path: Option<PathBuf>,
    /// Effective config, or the error that prevented loading it.
    pub config: InfraResult<ValidatedPluginConfig>,
}

impl CommandContext {
    pub fn config(&self) -> Result<&ValidatedPluginConfig, &InfraError> {
        self.config.as_ref()
    }
}

const FIELD_FLAGS: [&str; 5] = [
    "api_key",
    "organization_id",
    "model",
    "max_tokens",
    "temperature",
];

/// Form input as flags or as one JSON document.
///
/// Field flags overlay the default form; `--form-json` replaces it and any
/// missing key reads as blank.
#[derive(Debug, Args)]
pub struct FormArgs {
    /// Whole form as JSON (`apiKey`, `organizationId`, `model`, `maxTokens`, `temperature`).
    #[arg(long, conflicts_with_all = FIELD_FLAGS)]
    pub form_json: Option<String>,
    /// API key (`sk-` followed by 48 alphanumerics).
    #[arg(long)]
    pub api_key: Option<String>,
    /// Organization id.
    #[arg(long)]
    pub organization_id: Option<String>,
    /// Model identifier.
    #[arg(long)]
    pub model: Option<String>,
    /// Max tokens, as typed.
    #[arg(long, allow_hyphen_values = true)]
    pub max_tokens: Option<String>,
    /// Temperature, as typed.
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: Option<String>,
}

impl FormArgs {
    pub fn form_state(&self) -> Result<FormState, CliError> {
        if let Some(raw) = self.form_json.as_deref() {
            let dto: ApiV1FormStateDto = serde_json::from_str(raw)
                .map_err(|error| CliError::InvalidInput(format!("--form-json: {error}")))?;
            return Ok(dto.into());
        }

        let mut form = to_form_state(&default_settings());
        let overrides = [
            (FormField::ApiKey, &self.api_key),
            (FormField::OrganizationId, &self.organization_id),
            (FormField::Model, &self.model),
            (FormField::MaxTokens, &self.max_tokens),
            (FormField::Temperature, &self.temperature),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                form.set(field, value.as_str());
            }
        }
        Ok(form)
    }
}

/// Output for a form that failed validation; exits with invalid input.
pub fn invalid_form_output(
    mode: OutputMode,
    errors: &FieldErrors,
    mut stderr: String,
) -> Result<CliOutput, CliError> {
    log_info(&mut stderr, "form has validation errors", mode.no_progress);
    let stdout = if mode.is_json() {
        status_json("invalid", serde_json::to_value(field_errors_to_api_v1(errors))?)?
    } else {
        let mut out = status_text("invalid", [("valid", "false".to_string())]);
        out.push_str("errors:\n");
        for (field, message) in errors.iter() {
            out.push_str("  ");
            out.push_str(field.as_str());
            out.push_str(": ");
            out.push_str(message);
            out.push('\n');
        }
        out
    };
    Ok(CliOutput::new(stdout, stderr, ExitCode::InvalidInput))
}

/// `key: value` lines for a settings DTO; unset optionals print `-`.
pub fn settings_lines(dto: &ApiV1SettingsDto) -> Vec<(&'static str, String)> {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    vec![
        ("apiKey", dto.api_key.clone()),
        ("organizationId", or_dash(dto.organization_id.clone())),
        ("model", dto.model.clone()),
        ("maxTokens", or_dash(dto.max_tokens.map(|value| value.to_string()))),
        (
            "temperature",
            or_dash(dto.temperature.map(|value| value.to_string())),
        ),
    ]
}
