//! Config loading helpers (defaults + file + env).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{PluginConfig, PluginEnv, ValidatedPluginConfig, apply_env_overrides};
use openai_settings_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;

/// Config file syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json` (also used when there is no extension).
    Json,
    /// `.toml`
    Toml,
}

/// Load the plugin config from in-memory sources.
///
/// Precedence (highest wins):
/// - env overrides (`PluginEnv`)
/// - config text
/// - defaults (`PluginConfig::default()`)
pub fn load_plugin_config_from_sources(
    config_text: Option<(&str, ConfigFormat)>,
    env: &PluginEnv,
) -> Result<ValidatedPluginConfig, ErrorEnvelope> {
    let config = match config_text {
        None => PluginConfig::default(),
        Some((input, format)) => parse_config_unvalidated(input, format)?,
    };

    // env is applied last and also validates/normalizes the resulting config.
    apply_env_overrides(config, env)
}

/// Load the plugin config from an optional file path.
pub fn load_plugin_config_from_path(
    config_path: Option<&Path>,
    env: &PluginEnv,
) -> Result<ValidatedPluginConfig, ErrorEnvelope> {
    let config = match config_path {
        None => PluginConfig::default(),
        Some(path) => {
            let config_text = read_config_file(path)?;
            let format = detect_config_format(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };

    apply_env_overrides(config, env)
}

/// Load the plugin config from std env and an optional file path.
pub fn load_plugin_config_std_env(
    config_path: Option<&Path>,
) -> Result<ValidatedPluginConfig, ErrorEnvelope> {
    let env = PluginEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_plugin_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
///
/// The host API token is never serialized.
pub fn to_pretty_json(config: &PluginConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &PluginConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<PluginConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

/// Pick the parser from the file extension.
pub fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn env_wins_over_file_values() -> Result<(), Box<dyn std::error::Error>> {
        let config_json = r#"{
          "version": 1,
          "openai": { "timeoutMs": 45000 }
        }"#;

        let env = PluginEnv {
            openai_timeout_ms: Some(60_000),
            ..PluginEnv::default()
        };

        let config =
            load_plugin_config_from_sources(Some((config_json, ConfigFormat::Json)), &env)?;
        assert_eq!(config.openai.timeout_ms, Some(60_000));
        Ok(())
    }

    #[test]
    fn serialization_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
        let config = load_plugin_config_from_sources(None, &PluginEnv::default())?;
        let first = to_pretty_json(&config)?;
        let second = to_pretty_json(&config)?;
        assert_eq!(first, second);
        assert!(first.ends_with('\n'));
        Ok(())
    }

    #[test]
    fn serialized_config_omits_auth_token() -> Result<(), Box<dyn std::error::Error>> {
        let env = PluginEnv {
            remote_auth_token: Some("very-secret-token".into()),
            ..PluginEnv::default()
        };
        let config = load_plugin_config_from_sources(None, &env)?;
        assert!(config.remote.auth_token.is_some());

        assert!(!to_pretty_json(&config)?.contains("very-secret-token"));
        assert!(!to_pretty_toml(&config)?.contains("very-secret-token"));
        Ok(())
    }

    #[test]
    fn toml_round_trips_through_the_loader() -> Result<(), Box<dyn std::error::Error>> {
        let config = load_plugin_config_from_sources(None, &PluginEnv::default())?;
        let text = to_pretty_toml(&config)?;
        let reloaded = load_plugin_config_from_sources(
            Some((&text, ConfigFormat::Toml)),
            &PluginEnv::default(),
        )?;
        assert_eq!(reloaded, config);
        Ok(())
    }

    #[test]
    fn format_detection_by_extension() {
        assert!(matches!(
            detect_config_format(&PathBuf::from("plugin.TOML")),
            Ok(ConfigFormat::Toml)
        ));
        assert!(matches!(
            detect_config_format(&PathBuf::from("plugin")),
            Ok(ConfigFormat::Json)
        ));
        assert!(matches!(
            detect_config_format(&PathBuf::from("plugin.yaml")),
            Err(error) if error.code == ErrorCode::new("config", "unsupported_format")
        ));
    }

    #[test]
    fn missing_file_has_specific_code() {
        let result = load_plugin_config_from_path(
            Some(Path::new("/nonexistent/openai-settings.json")),
            &PluginEnv::default(),
        );
        assert!(matches!(
            result,
            Err(error) if error.code == ErrorCode::new("config", "config_file_not_found")
        ));
    }
}
