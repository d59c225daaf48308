//! Config loading helpers for CLI surfaces.

use crate::InfraResult;
use openai_settings_config::{
    PluginEnv, ValidatedPluginConfig, load_plugin_config_from_path, to_pretty_json,
};
use openai_settings_shared::ErrorEnvelope;
use std::collections::BTreeMap;
use std::path::Path;

/// Load and validate the effective config from an env snapshot and an optional file.
pub fn load_effective_config(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
) -> InfraResult<ValidatedPluginConfig> {
    let env = PluginEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    load_plugin_config_from_path(config_path, &env)
}

/// Load and validate the effective config, returning deterministic pretty JSON.
///
/// The host API token is never part of the output.
pub fn load_effective_config_json(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
) -> InfraResult<String> {
    let config = load_effective_config(env, config_path)?;
    to_pretty_json(&config)
}
