//! # openai-settings-config
//!
//! Configuration schema, validation, and layered loading for the plugin.
//! This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_LOCAL_PATH, ENV_LOCAL_STORAGE_KEY, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_OPENAI_BASE_URL,
    ENV_OPENAI_TIMEOUT_MS, ENV_REMOTE_AUTH_TOKEN, ENV_REMOTE_BASE_URL, ENV_REMOTE_ENABLED,
    ENV_REMOTE_SETTINGS_PATH, ENV_REMOTE_TIMEOUT_MS, EnvParseError, PluginEnv, apply_env_overrides,
};
pub use load::{
    ConfigFormat, detect_config_format, load_plugin_config_from_path,
    load_plugin_config_from_sources, load_plugin_config_std_env, to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, DEFAULT_LOCAL_PATH, DEFAULT_OPENAI_BASE_URL,
    DEFAULT_REMOTE_BASE_URL, DEFAULT_SETTINGS_PATH, DEFAULT_STORAGE_KEY, LocalConfig, LogFormat,
    LoggingConfig, OpenAiConfig, PluginConfig, RemoteConfig, ValidatedPluginConfig,
    parse_plugin_config_json, parse_plugin_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
