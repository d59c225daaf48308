//! Save and load command handlers.

use super::{CommandContext, FormArgs, invalid_form_output, settings_lines};
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{format_error_output, log_info, status_json, status_text};
use openai_settings_api::v1::{ApiV1LoadResponseDto, save_outcome_to_api_v1, settings_to_api_v1};
use openai_settings_domain::{has_errors, to_settings, validate};
use openai_settings_infra::{run_load_local, run_save_local};

/// Validate the form, then persist it through the gateway.
///
/// A failed save (both backends rejected the write) exits with invalid input.
pub fn run_save(ctx: &CommandContext, args: &FormArgs) -> Result<CliOutput, CliError> {
    let form = args.form_state()?;
    let errors = validate(&form);
    if has_errors(&errors) {
        return invalid_form_output(ctx.mode, &errors, String::new());
    }

    let config = match ctx.config() {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(ctx.mode, error)),
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "saving settings", ctx.mode.no_progress);

    let outcome = match run_save_local(config, &to_settings(&form)) {
        Ok(outcome) => outcome,
        Err(error) => return Ok(format_error_output(ctx.mode, &error)),
    };
    let dto = save_outcome_to_api_v1(&outcome);
    let status = if dto.success { "ok" } else { "failed" };

    let stdout = if ctx.mode.is_json() {
        status_json(status, serde_json::to_value(&dto)?)?
    } else {
        status_text(
            status,
            [
                ("success", dto.success.to_string()),
                ("message", dto.message.clone()),
            ],
        )
    };
    let exit_code = if dto.success {
        ExitCode::Ok
    } else {
        ExitCode::InvalidInput
    };

    Ok(CliOutput::new(stdout, stderr, exit_code))
}

/// Load stored settings, optionally falling back to the defaults.
pub fn run_load(
    ctx: &CommandContext,
    fallback_to_defaults: bool,
    reveal_key: bool,
) -> Result<CliOutput, CliError> {
    let config = match ctx.config() {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(ctx.mode, error)),
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "loading settings", ctx.mode.no_progress);

    let loaded = match run_load_local(config, fallback_to_defaults) {
        Ok(loaded) => loaded,
        Err(error) => return Ok(format_error_output(ctx.mode, &error)),
    };
    let dto = ApiV1LoadResponseDto {
        settings: loaded
            .as_ref()
            .map(|loaded| settings_to_api_v1(&loaded.settings, reveal_key)),
        source: loaded.as_ref().map(|loaded| loaded.source.as_str().to_string()),
    };

    let stdout = if ctx.mode.is_json() {
        status_json("ok", serde_json::to_value(&dto)?)?
    } else {
        match (&dto.settings, &dto.source) {
            (Some(settings), Some(source)) => {
                let mut lines = vec![("source", source.clone())];
                lines.extend(settings_lines(settings));
                status_text("ok", lines)
            },
            _ => status_text("ok", [("settings", "none".to_string())]),
        }
    };

    Ok(CliOutput::new(stdout, stderr, ExitCode::Ok))
}
