//! Test-connection command handler.

use super::{CommandContext, invalid_form_output};
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{format_error_output, log_info, status_json, status_text};
use openai_settings_api::v1::connectivity_to_api_v1;
use openai_settings_domain::{CREDENTIAL_FIELDS, FormState, to_settings, validate};
use openai_settings_infra::{run_load_local, run_test_connection_local};

/// Probe the provider's model listing.
///
/// Credentials come from the flags, or from the stored settings when
/// `--api-key` is absent. Only the credential fields are validated before
/// the probe; a failed probe exits with invalid input.
pub fn run_test_connection(
    ctx: &CommandContext,
    api_key: Option<&str>,
    organization_id: Option<&str>,
) -> Result<CliOutput, CliError> {
    let config = match ctx.config() {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(ctx.mode, error)),
    };

    let mut stderr = String::new();
    let (api_key, organization_id) = match api_key {
        Some(key) => (key.to_string(), organization_id.map(str::to_string)),
        None => {
            log_info(&mut stderr, "using stored credentials", ctx.mode.no_progress);
            let stored = match run_load_local(config, false) {
                Ok(stored) => stored,
                Err(error) => return Ok(format_error_output(ctx.mode, &error)),
            };
            let Some(stored) = stored else {
                return Err(CliError::InvalidInput(
                    "no stored settings; pass --api-key".to_string(),
                ));
            };
            let organization_id = organization_id
                .map(str::to_string)
                .or(stored.settings.organization_id);
            (stored.settings.api_key, organization_id)
        },
    };

    let form = FormState {
        api_key,
        organization_id: organization_id.unwrap_or_default(),
        ..FormState::default()
    };
    let credential_errors = validate(&form).only(&CREDENTIAL_FIELDS);
    if !credential_errors.is_empty() {
        return invalid_form_output(ctx.mode, &credential_errors, stderr);
    }

    let settings = to_settings(&form);
    log_info(&mut stderr, "probing model listing", ctx.mode.no_progress);
    let result = match run_test_connection_local(
        config,
        &settings.api_key,
        settings.organization_id.as_deref(),
    ) {
        Ok(result) => result,
        Err(error) => return Ok(format_error_output(ctx.mode, &error)),
    };
    let dto = connectivity_to_api_v1(&result);
    let status = if dto.success { "ok" } else { "failed" };

    let stdout = if ctx.mode.is_json() {
        status_json(status, serde_json::to_value(&dto)?)?
    } else {
        let mut lines = vec![
            ("success", dto.success.to_string()),
            ("message", dto.message.clone()),
        ];
        if let Some(error) = &dto.error {
            lines.push(("error", error.clone()));
        }
        if let Some(models) = &dto.models {
            lines.push(("models", models.join(", ")));
        }
        status_text(status, lines)
    };
    let exit_code = if dto.success {
        ExitCode::Ok
    } else {
        ExitCode::InvalidInput
    };

    Ok(CliOutput::new(stdout, stderr, exit_code))
}

