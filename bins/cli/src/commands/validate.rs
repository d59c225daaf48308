//! Validate command handler.

use super::{CommandContext, FormArgs, invalid_form_output};
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{log_info, status_json, status_text};
use openai_settings_domain::{has_errors, validate};

/// Run field validation on the given form.
pub fn run_validate(ctx: &CommandContext, args: &FormArgs) -> Result<CliOutput, CliError> {
    let form = args.form_state()?;
    let errors = validate(&form);
    tracing::debug!(failing_fields = errors.len(), "form validated");

    if has_errors(&errors) {
        return invalid_form_output(ctx.mode, &errors, String::new());
    }

    let mut stderr = String::new();
    log_info(&mut stderr, "form is valid", ctx.mode.no_progress);

    let stdout = if ctx.mode.is_json() {
        status_json("ok", serde_json::json!({ "valid": true, "errors": {} }))?
    } else {
        status_text("ok", [("valid", "true".to_string())])
    };

    Ok(CliOutput::new(stdout, stderr, ExitCode::Ok))
}
