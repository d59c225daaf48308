//! Adapter selection and use-case wiring from validated config.

use crate::InfraResult;
use openai_settings_adapters::events::TracingEventPublisher;
use openai_settings_adapters::file_storage::JsonFileStorage;
use openai_settings_adapters::http::braindrive::{BrainDriveApiConfig, BrainDriveSettingsClient};
use openai_settings_adapters::http::openai_models::{OpenAiModelCatalog, OpenAiModelCatalogConfig};
use openai_settings_app::{
    ConnectionProber, SettingsGateway, SettingsGatewayDeps, SettingsGatewayOptions,
};
use openai_settings_config::ValidatedPluginConfig;
use openai_settings_ports::{LocalStoragePort, ModelListingPort, RemoteSettingsPort};
use std::sync::Arc;

/// Use cases wired against concrete adapters.
pub struct SettingsRuntime {
    /// Remote-then-local persistence.
    pub gateway: SettingsGateway,
    /// Connectivity probe.
    pub prober: ConnectionProber,
    /// Whether the host settings API is in the chain.
    pub remote_enabled: bool,
}

/// Build the runtime.
///
/// Each `settings-updated` event is written to the tracing pipeline.
pub fn build_settings_runtime(config: &ValidatedPluginConfig) -> InfraResult<SettingsRuntime> {
    let remote = build_remote_settings_port(config)?;
    let remote_enabled = remote.is_some();

    let gateway = SettingsGateway::new(
        SettingsGatewayDeps {
            remote,
            local: build_local_storage_port(config),
            events: Some(Arc::new(TracingEventPublisher)),
        },
        SettingsGatewayOptions {
            settings_path: config.remote.settings_path.clone(),
            storage_key: config.local.storage_key.clone(),
        },
    );
    let prober = ConnectionProber::new(build_model_listing_port(config)?);

    tracing::debug!(
        remote_enabled,
        local_path = %config.local.path.display(),
        openai_base_url = %config.openai.base_url,
        "settings runtime ready"
    );

    Ok(SettingsRuntime {
        gateway,
        prober,
        remote_enabled,
    })
}

/// Host settings API client, or `None` when the remote tier is disabled.
pub fn build_remote_settings_port(
    config: &ValidatedPluginConfig,
) -> InfraResult<Option<Arc<dyn RemoteSettingsPort>>> {
    if !config.remote.enabled {
        return Ok(None);
    }
    let client = BrainDriveSettingsClient::new(&BrainDriveApiConfig {
        base_url: config.remote.base_url.clone(),
        timeout_ms: config.remote.timeout_ms,
        auth_token: config.remote.auth_token.clone(),
    })?;
    Ok(Some(Arc::new(client)))
}

/// JSON-file local store at the configured path.
#[must_use]
pub fn build_local_storage_port(config: &ValidatedPluginConfig) -> Arc<dyn LocalStoragePort> {
    Arc::new(JsonFileStorage::new(config.local.path.clone()))
}

/// Provider `GET /models` client.
pub fn build_model_listing_port(
    config: &ValidatedPluginConfig,
) -> InfraResult<Arc<dyn ModelListingPort>> {
    let catalog = OpenAiModelCatalog::new(&OpenAiModelCatalogConfig {
        base_url: Some(config.openai.base_url.clone()),
        timeout_ms: config.openai.timeout_ms,
    })?;
    Ok(Arc::new(catalog))
}
