//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict (invalid values fail fast) and never echoes secret
//! values in error metadata.

use crate::schema::{LogFormat, PluginConfig, ValidatedPluginConfig};
use openai_settings_shared::{ErrorCode, ErrorEnvelope, REDACTED_VALUE, SecretString, is_secret_key};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Env var: enable the host settings API.
pub const ENV_REMOTE_ENABLED: &str = "OAS_REMOTE_ENABLED";
/// Env var: host API base URL.
pub const ENV_REMOTE_BASE_URL: &str = "OAS_REMOTE_BASE_URL";
/// Env var: host settings path.
pub const ENV_REMOTE_SETTINGS_PATH: &str = "OAS_REMOTE_SETTINGS_PATH";
/// Env var: host API timeout in milliseconds.
pub const ENV_REMOTE_TIMEOUT_MS: &str = "OAS_REMOTE_TIMEOUT_MS";
/// Env var: host API bearer token (secret).
pub const ENV_REMOTE_AUTH_TOKEN: &str = "OAS_REMOTE_AUTH_TOKEN";
/// Env var: local settings file.
pub const ENV_LOCAL_PATH: &str = "OAS_LOCAL_PATH";
/// Env var: local storage key.
pub const ENV_LOCAL_STORAGE_KEY: &str = "OAS_LOCAL_STORAGE_KEY";
/// Env var: provider base URL.
pub const ENV_OPENAI_BASE_URL: &str = "OAS_OPENAI_BASE_URL";
/// Env var: provider timeout in milliseconds.
pub const ENV_OPENAI_TIMEOUT_MS: &str = "OAS_OPENAI_TIMEOUT_MS";
/// Env var: log level / filter directive.
pub const ENV_LOG_LEVEL: &str = "OAS_LOG_LEVEL";
/// Env var: log format (`text` or `json`).
pub const ENV_LOG_FORMAT: &str = "OAS_LOG_FORMAT";

const ALL_VARS: [&str; 11] = [
    ENV_REMOTE_ENABLED,
    ENV_REMOTE_BASE_URL,
    ENV_REMOTE_SETTINGS_PATH,
    ENV_REMOTE_TIMEOUT_MS,
    ENV_REMOTE_AUTH_TOKEN,
    ENV_LOCAL_PATH,
    ENV_LOCAL_STORAGE_KEY,
    ENV_OPENAI_BASE_URL,
    ENV_OPENAI_TIMEOUT_MS,
    ENV_LOG_LEVEL,
    ENV_LOG_FORMAT,
];

/// Typed env-derived overrides for [`PluginConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginEnv {
    /// Override for `remote.enabled`.
    pub remote_enabled: Option<bool>,
    /// Override for `remote.baseUrl`.
    pub remote_base_url: Option<Box<str>>,
    /// Override for `remote.settingsPath`.
    pub remote_settings_path: Option<Box<str>>,
    /// Override for `remote.timeoutMs`.
    pub remote_timeout_ms: Option<u64>,
    /// Host API bearer token.
    pub remote_auth_token: Option<SecretString>,
    /// Override for `local.path`.
    pub local_path: Option<PathBuf>,
    /// Override for `local.storageKey`.
    pub local_storage_key: Option<Box<str>>,
    /// Override for `openai.baseUrl`.
    pub openai_base_url: Option<Box<str>>,
    /// Override for `openai.timeoutMs`.
    pub openai_timeout_ms: Option<u64>,
    /// Override for `logging.level`.
    pub log_level: Option<Box<str>>,
    /// Override for `logging.format`.
    pub log_format: Option<LogFormat>,
}

impl PluginEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            remote_enabled: parse_optional_bool(map, ENV_REMOTE_ENABLED)?,
            remote_base_url: parse_optional_url_string(map, ENV_REMOTE_BASE_URL)?,
            remote_settings_path: parse_optional_trimmed_string(map, ENV_REMOTE_SETTINGS_PATH)?,
            remote_timeout_ms: parse_optional_u64(map, ENV_REMOTE_TIMEOUT_MS)?,
            remote_auth_token: parse_optional_secret(map, ENV_REMOTE_AUTH_TOKEN)?,
            local_path: parse_optional_trimmed_string(map, ENV_LOCAL_PATH)?
                .map(|path| PathBuf::from(path.as_ref())),
            local_storage_key: parse_optional_trimmed_string(map, ENV_LOCAL_STORAGE_KEY)?,
            openai_base_url: parse_optional_url_string(map, ENV_OPENAI_BASE_URL)?,
            openai_timeout_ms: parse_optional_u64(map, ENV_OPENAI_TIMEOUT_MS)?,
            log_level: parse_optional_trimmed_string(map, ENV_LOG_LEVEL)?,
            log_format: parse_optional_log_format(map, ENV_LOG_FORMAT)?,
        })
    }

    /// Parse env overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: PluginConfig,
    env: &PluginEnv,
) -> Result<ValidatedPluginConfig, ErrorEnvelope> {
    let mut config = base;

    set_value(&mut config.remote.enabled, env.remote_enabled);
    set_clone(&mut config.remote.base_url, env.remote_base_url.as_ref());
    set_clone(
        &mut config.remote.settings_path,
        env.remote_settings_path.as_ref(),
    );
    set_optional(&mut config.remote.timeout_ms, env.remote_timeout_ms);
    if let Some(token) = env.remote_auth_token.as_ref() {
        config.remote.auth_token = Some(token.clone());
    }

    set_clone(&mut config.local.path, env.local_path.as_ref());
    set_clone(
        &mut config.local.storage_key,
        env.local_storage_key.as_ref(),
    );

    set_clone(&mut config.openai.base_url, env.openai_base_url.as_ref());
    set_optional(&mut config.openai.timeout_ms, env.openai_timeout_ms);

    set_clone(&mut config.logging.level, env.log_level.as_ref());
    set_value(&mut config.logging.format, env.log_format);

    config.validate_and_normalize().map_err(Into::into)
}

fn set_value<T: Copy>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

const fn set_optional(field: &mut Option<u64>, value: Option<u64>) {
    if value.is_some() {
        *field = value;
    }
}

fn set_clone<T: Clone>(field: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// A secret env var was present but empty after trimming.
    EmptySecret {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// URL env var had an invalid value.
    InvalidUrl {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } | Self::EmptySecret { .. } => {
                ErrorCode::new("config", "empty_env_var")
            },
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::InvalidUrl { .. } => ErrorCode::new("config", "invalid_env_url"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } | Self::EmptySecret { var } => {
                write!(formatter, "{var} must be non-empty")
            },
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidInt { var, .. } => write!(formatter, "{var} must be an integer"),
            Self::InvalidUrl { var, .. } => write!(formatter, "{var} must be a valid URL"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } | EnvParseError::EmptySecret { var } => {
                envelope = envelope.with_metadata("env_var", var);
            },
            EnvParseError::InvalidBool { var, value }
            | EnvParseError::InvalidInt { var, value }
            | EnvParseError::InvalidUrl { var, value }
            | EnvParseError::InvalidEnum { var, value } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", redact_value(var, &value));
            },
        }

        envelope
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_secret(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<SecretString>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptySecret { var });
    }

    Ok(Some(SecretString::new(trimmed.to_owned())))
}

fn parse_optional_u64(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u64>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_log_format(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<LogFormat>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    LogFormat::parse(raw)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_url_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    let parsed = Url::parse(trimmed).map_err(|_| EnvParseError::InvalidUrl {
        var,
        value: raw.clone(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(EnvParseError::InvalidUrl {
            var,
            value: raw.clone(),
        });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn redact_value(var: &str, value: &str) -> String {
    if is_secret_key(var) {
        REDACTED_VALUE.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn map_of(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn missing_vars_parse_to_empty_overrides() -> Result<(), Box<dyn Error>> {
        assert_eq!(PluginEnv::from_map(&BTreeMap::new())?, PluginEnv::default());
        Ok(())
    }

    #[test]
    fn bool_spellings_are_accepted() -> Result<(), Box<dyn Error>> {
        for (raw, expected) in [("yes", true), ("OFF", false), ("1", true), ("false", false)] {
            let env = PluginEnv::from_map(&map_of(&[(ENV_REMOTE_ENABLED, raw)]))?;
            assert_eq!(env.remote_enabled, Some(expected));
        }
        let error = PluginEnv::from_map(&map_of(&[(ENV_REMOTE_ENABLED, "maybe")])).err();
        assert!(matches!(error, Some(EnvParseError::InvalidBool { .. })));
        Ok(())
    }

    #[test]
    fn url_validation_accepts_http_and_https() -> Result<(), Box<dyn Error>> {
        let env = PluginEnv::from_map(&map_of(&[(ENV_OPENAI_BASE_URL, "http://127.0.0.1:9/v1")]))?;
        assert_eq!(env.openai_base_url.as_deref(), Some("http://127.0.0.1:9/v1"));

        let error = PluginEnv::from_map(&map_of(&[(ENV_OPENAI_BASE_URL, "ftp://example.com")])).err();
        assert!(matches!(error, Some(EnvParseError::InvalidUrl { .. })));
        Ok(())
    }

    #[test]
    fn secret_values_are_redacted_in_error_metadata() -> Result<(), Box<dyn Error>> {
        let error = PluginEnv::from_map(&map_of(&[(ENV_REMOTE_AUTH_TOKEN, "   ")])).err();
        let envelope: ErrorEnvelope = error
            .ok_or_else(|| std::io::Error::other("expected secret error"))?
            .into();

        assert_eq!(envelope.code, ErrorCode::new("config", "empty_env_var"));
        assert_eq!(
            envelope.metadata.get("env_var").map(String::as_str),
            Some(ENV_REMOTE_AUTH_TOKEN)
        );
        assert!(!envelope.metadata.contains_key("value"));
        Ok(())
    }

    #[test]
    fn env_wins_over_base_config() -> Result<(), Box<dyn Error>> {
        let env = PluginEnv::from_map(&map_of(&[
            (ENV_REMOTE_ENABLED, "false"),
            (ENV_REMOTE_AUTH_TOKEN, "host-token"),
            (ENV_LOCAL_STORAGE_KEY, "other_key"),
            (ENV_OPENAI_TIMEOUT_MS, "5000"),
            (ENV_LOG_FORMAT, "JSON"),
        ]))?;
        let config = apply_env_overrides(PluginConfig::default(), &env)?;

        assert!(!config.remote.enabled);
        assert_eq!(
            config.remote.auth_token.as_ref().map(SecretString::expose),
            Some("host-token")
        );
        assert_eq!(config.local.storage_key.as_ref(), "other_key");
        assert_eq!(config.openai.timeout_ms, Some(5_000));
        assert_eq!(config.logging.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn overrides_are_validated() {
        let env = PluginEnv {
            remote_timeout_ms: Some(1),
            ..PluginEnv::default()
        };
        let result = apply_env_overrides(PluginConfig::default(), &env);
        assert!(matches!(
            result,
            Err(error) if error.code == ErrorCode::new("config", "invalid_timeout")
        ));
    }
}
