//! Blocking entry points for CLI commands.
//!
//! Each call builds the runtime from config, runs one use case on a
//! current-thread tokio runtime, and returns its result.

use crate::runtime_factory::{SettingsRuntime, build_settings_runtime};
use crate::{InfraError, InfraResult};
use openai_settings_app::LoadSource;
use openai_settings_config::ValidatedPluginConfig;
use openai_settings_domain::{ConnectivityResult, SaveOutcome, Settings, default_settings};
use openai_settings_shared::RequestContext;
use std::future::Future;

/// Settings returned by a load, with their origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    /// Loaded (or default) settings.
    pub settings: Settings,
    /// Backend that supplied them.
    pub source: LoadSource,
}

/// Persist settings through the gateway.
pub fn run_save_local(
    config: &ValidatedPluginConfig,
    settings: &Settings,
) -> InfraResult<SaveOutcome> {
    let runtime = build_settings_runtime(config)?;
    run_async_with_ctx(RequestContext::new_request(), |ctx| async move {
        Ok(runtime.gateway.save(&ctx, settings).await)
    })
}

/// Load stored settings.
///
/// With `fallback_to_defaults`, an empty store yields the defaults tagged
/// [`LoadSource::Defaults`]; otherwise it yields `None`.
pub fn run_load_local(
    config: &ValidatedPluginConfig,
    fallback_to_defaults: bool,
) -> InfraResult<Option<LoadedSettings>> {
    let runtime = build_settings_runtime(config)?;
    let loaded = run_async_with_ctx(RequestContext::new_request(), |ctx| async move {
        Ok(runtime.gateway.load_with_source(&ctx).await)
    })?;
    let loaded = loaded.map(|(settings, source)| LoadedSettings { settings, source });
    if loaded.is_none() && fallback_to_defaults {
        return Ok(Some(LoadedSettings {
            settings: default_settings(),
            source: LoadSource::Defaults,
        }));
    }
    Ok(loaded)
}

/// Probe the provider with the given credentials.
pub fn run_test_connection_local(
    config: &ValidatedPluginConfig,
    api_key: &str,
    organization_id: Option<&str>,
) -> InfraResult<ConnectivityResult> {
    let SettingsRuntime { prober, .. } = build_settings_runtime(config)?;
    run_async_with_ctx(RequestContext::new_request(), |ctx| async move {
        Ok(prober
            .test_connection(&ctx, api_key, organization_id)
            .await)
    })
}

fn run_async_with_ctx<F, T>(
    ctx: RequestContext,
    op: impl FnOnce(RequestContext) -> F,
) -> InfraResult<T>
where
    F: Future<Output = InfraResult<T>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(InfraError::from)?;
    runtime.block_on(async { op(ctx).await })
}
