//! Output format helpers for CLI commands.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use clap::{Args, ValueEnum};
use openai_settings_api::v1::{ApiV1ErrorDto, ApiV1ErrorKind, error_envelope_to_api_v1_error};
use openai_settings_infra::{InfraError, is_secret_key};
use openai_settings_shared::REDACTED_VALUE;
use serde::Serialize;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly `key: value` lines.
    #[default]
    Text,
    /// Machine-friendly JSON output.
    Json,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
    /// Suppress `info:` progress lines on stderr.
    #[arg(long, global = true)]
    pub no_progress: bool,
}

/// Output mode derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub format: OutputFormat,
    pub no_progress: bool,
}

impl OutputMode {
    /// Build output mode from CLI flags.
    #[must_use]
    pub fn from_args(args: &OutputArgs) -> Self {
        Self {
            format: args.output.unwrap_or_default(),
            no_progress: args.no_progress,
        }
    }

    /// Returns true when JSON output is requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

/// Pretty JSON with a trailing newline.
pub fn to_json_output<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

/// `{"status": <status>, ...payload}`.
///
/// Object payloads are flattened into the root; anything else lands under
/// `data`.
pub fn status_json(status: &str, payload: serde_json::Value) -> Result<String, CliError> {
    let mut root = serde_json::Map::new();
    root.insert(
        "status".to_string(),
        serde_json::Value::String(status.to_string()),
    );
    match payload {
        serde_json::Value::Object(map) => root.extend(map),
        serde_json::Value::Null => {},
        other => {
            root.insert("data".to_string(), other);
        },
    }
    to_json_output(&serde_json::Value::Object(root))
}

/// Render `status: <status>` followed by `key: value` lines.
pub fn status_text<'a>(status: &str, lines: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let mut out = format!("status: {status}\n");
    for (key, value) in lines {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    out
}

pub fn log_info(stderr: &mut String, message: &str, no_progress: bool) {
    if no_progress {
        return;
    }
    stderr.push_str("info: ");
    stderr.push_str(message);
    stderr.push('\n');
}

/// Render an infra failure as the command's output.
pub fn format_error_output(mode: OutputMode, error: &InfraError) -> CliOutput {
    let exit_code = ExitCode::for_envelope(error);
    let api_error = sanitize_api_error(error_envelope_to_api_v1_error(error, None));

    let mut stderr = String::new();
    log_info(&mut stderr, "command failed", mode.no_progress);

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": api_error,
        });
        to_json_output(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"code\":\"ERR_CORE_INTERNAL\",\"message\":\"internal error\",\"kind\":\"INVARIANT\"}}\n".to_string()
        })
    } else {
        format_api_error_text(&api_error)
    };

    CliOutput {
        stdout,
        stderr,
        exit_code,
    }
}

pub fn sanitize_api_error(mut error: ApiV1ErrorDto) -> ApiV1ErrorDto {
    if let Some(meta) = error.meta.as_mut() {
        for (key, value) in meta.iter_mut() {
            if is_secret_key(key) {
                *value = REDACTED_VALUE.to_string();
            }
        }
    }
    error
}

fn format_api_error_text(error: &ApiV1ErrorDto) -> String {
    let kind = match error.kind {
        ApiV1ErrorKind::Expected => "EXPECTED",
        ApiV1ErrorKind::Invariant => "INVARIANT",
    };
    let mut out = status_text(
        "error",
        [
            ("code", error.code.clone()),
            ("message", error.message.clone()),
            ("kind", kind.to_string()),
        ],
    );

    if let Some(meta) = error.meta.as_ref()
        && !meta.is_empty()
    {
        out.push_str("meta:\n");
        for (key, value) in meta {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use openai_settings_shared::{ErrorCode, ErrorEnvelope};
    use std::collections::BTreeMap;

    const QUIET_TEXT: OutputMode = OutputMode {
        format: OutputFormat::Text,
        no_progress: true,
    };

    #[test]
    fn status_json_flattens_objects() -> Result<(), CliError> {
        let output = status_json("ok", serde_json::json!({"valid": true}))?;
        let value: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!(value, serde_json::json!({"status": "ok", "valid": true}));
        assert!(output.ends_with('\n'));

        let wrapped: serde_json::Value =
            serde_json::from_str(&status_json("ok", serde_json::json!(["gpt-4o"]))?)?;
        assert_eq!(wrapped["data"], serde_json::json!(["gpt-4o"]));
        Ok(())
    }

    #[test]
    fn sanitize_redacts_secret_meta_keys() {
        let error = ApiV1ErrorDto {
            code: "ERR_CONFIG_INVALID_ENV_URL".to_string(),
            message: "bad env".to_string(),
            kind: ApiV1ErrorKind::Expected,
            meta: Some(BTreeMap::from([
                ("authToken".to_string(), "host-token".to_string()),
                ("field".to_string(), "timeoutMs".to_string()),
            ])),
        };

        let meta = sanitize_api_error(error).meta.unwrap_or_default();
        assert_eq!(meta.get("authToken").map(String::as_str), Some(REDACTED_VALUE));
        assert_eq!(meta.get("field").map(String::as_str), Some("timeoutMs"));
    }

    #[test]
    fn error_output_text_shape() {
        let error = ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_env_int"),
            "OAS_OPENAI_TIMEOUT_MS must be an integer",
        )
        .with_metadata("field", "OAS_OPENAI_TIMEOUT_MS");

        let output = format_error_output(QUIET_TEXT, &error);
        assert_eq!(output.exit_code, ExitCode::InvalidInput);
        assert!(output.stderr.is_empty());
        assert!(output.stdout.starts_with("status: error\n"));
        assert!(output.stdout.contains("kind: EXPECTED\n"));
        assert!(output.stdout.contains("meta:\n  field: OAS_OPENAI_TIMEOUT_MS\n"));
    }
}
