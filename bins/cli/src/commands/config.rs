//! Config show command handler.

use super::CommandContext;
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{format_error_output, log_info, status_json};
use openai_settings_config::to_pretty_json;

/// Print the effective config after file and env layering.
///
/// The host API token is never printed; only whether one is set.
pub fn run_config_show(ctx: &CommandContext) -> Result<CliOutput, CliError> {
    let config = match ctx.config() {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(ctx.mode, error)),
    };
    let config_json = match to_pretty_json(config) {
        Ok(json) => json,
        Err(error) => return Ok(format_error_output(ctx.mode, &error)),
    };
    let auth_token_set = config.remote.auth_token.is_some();

    let mut stderr = String::new();
    log_info(&mut stderr, "config show completed", ctx.mode.no_progress);

    let stdout = if ctx.mode.is_json() {
        let config_value: serde_json::Value = serde_json::from_str(config_json.trim())?;
        status_json(
            "ok",
            serde_json::json!({
                "configPath": ctx
                    .config_path
                    .as_ref()
                    .map(|path| path.to_string_lossy().to_string()),
                "remoteAuthTokenSet": auth_token_set,
                "effectiveConfig": config_value,
            }),
        )?
    } else {
        let mut out = String::from("status: ok\n");
        if let Some(path) = &ctx.config_path {
            out.push_str("path: ");
            out.push_str(&path.to_string_lossy());
            out.push('\n');
        }
        out.push_str("remoteAuthToken: ");
        out.push_str(if auth_token_set { "set" } else { "unset" });
        out.push_str("\nconfig:\n");
        out.push_str(&config_json);
        out
    };

    Ok(CliOutput::new(stdout, stderr, ExitCode::Ok))
}
