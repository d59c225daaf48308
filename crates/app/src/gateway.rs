//! Settings persistence with remote-then-local fallback.

use openai_settings_domain::messages::{SETTINGS_INVALID, UNSUPPORTED_MODEL};
use openai_settings_domain::{
    InvalidSettings, SaveOutcome, Settings, SettingsUpdatedEvent, default_settings,
    validate_settings,
};
use openai_settings_ports::{LocalStoragePort, RemoteSettingsPort, SettingsEventPort};
use openai_settings_shared::RequestContext;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Remote path used when none is configured.
pub const DEFAULT_SETTINGS_PATH: &str = "/api/v1/settings/openai";
/// Local storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "braindrive_openai_settings";

/// Dependencies required by the gateway.
#[derive(Clone)]
pub struct SettingsGatewayDeps {
    /// Host settings API; `None` means local storage only.
    pub remote: Option<Arc<dyn RemoteSettingsPort>>,
    /// Local key-value fallback.
    pub local: Arc<dyn LocalStoragePort>,
    /// Optional `settings-updated` publisher.
    pub events: Option<Arc<dyn SettingsEventPort>>,
}

/// Where the gateway reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsGatewayOptions {
    /// Remote path for `get`/`post`.
    pub settings_path: Box<str>,
    /// Local storage key.
    pub storage_key: Box<str>,
}

impl Default for SettingsGatewayOptions {
    fn default() -> Self {
        Self {
            settings_path: DEFAULT_SETTINGS_PATH.into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
        }
    }
}

/// Backend a loaded record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSource {
    /// Host settings API.
    Remote,
    /// Local fallback store.
    Local,
    /// Nothing stored; built-in defaults.
    Defaults,
}

impl LoadSource {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
            Self::Defaults => "defaults",
        }
    }
}

/// Persistence abstraction over the injected ports.
#[derive(Clone)]
pub struct SettingsGateway {
    deps: SettingsGatewayDeps,
    options: SettingsGatewayOptions,
}

impl SettingsGateway {
    /// Build a gateway.
    #[must_use]
    pub const fn new(deps: SettingsGatewayDeps, options: SettingsGatewayOptions) -> Self {
        Self { deps, options }
    }

    /// Configured paths.
    #[must_use]
    pub const fn options(&self) -> &SettingsGatewayOptions {
        &self.options
    }

    /// Persist `settings`, remote first.
    ///
    /// Never returns an error: a total failure is reported through
    /// [`SaveOutcome::failed`] carrying the local store's message. A record
    /// that [`validate_settings`] would reject on load, such as one naming a
    /// model outside the allow-list, is refused before either backend is
    /// touched.
    #[tracing::instrument(
        name = "gateway.save",
        skip_all,
        fields(correlation_id = %ctx.correlation_id())
    )]
    pub async fn save(&self, ctx: &RequestContext, settings: &Settings) -> SaveOutcome {
        let body = settings.to_json();
        if let Err(error) = validate_settings(&body) {
            tracing::warn!(%error, "refusing to save settings that would not load back");
            return SaveOutcome::failed(rejection_message(&error));
        }

        if let Some(remote) = self.deps.remote.as_ref() {
            match remote
                .post(ctx, self.options.settings_path.clone(), body.clone())
                .await
            {
                Ok(()) => {
                    tracing::info!(path = %self.options.settings_path, "settings saved remotely");
                    self.broadcast_update(settings);
                    return SaveOutcome::saved_remotely();
                },
                Err(error) => {
                    tracing::warn!(
                        code = %error.code,
                        error = %error.message,
                        "remote save failed, falling back to local storage"
                    );
                },
            }
        }

        match self
            .deps
            .local
            .set_item(ctx, self.options.storage_key.clone(), body.to_string())
            .await
        {
            Ok(()) => {
                tracing::info!(key = %self.options.storage_key, "settings saved locally");
                self.broadcast_update(settings);
                SaveOutcome::saved_locally()
            },
            Err(error) => {
                tracing::error!(code = %error.code, error = %error.message, "local save failed");
                SaveOutcome::failed(error.message)
            },
        }
    }

    /// Load the stored record, or `None` when nothing valid is stored.
    pub async fn load(&self, ctx: &RequestContext) -> Option<Settings> {
        self.load_with_source(ctx)
            .await
            .map(|(settings, _source)| settings)
    }

    /// Load the stored record together with the backend that supplied it.
    #[tracing::instrument(
        name = "gateway.load",
        skip_all,
        fields(correlation_id = %ctx.correlation_id())
    )]
    pub async fn load_with_source(&self, ctx: &RequestContext) -> Option<(Settings, LoadSource)> {
        if let Some(remote) = self.deps.remote.as_ref() {
            match remote.get(ctx, self.options.settings_path.clone()).await {
                Ok(Value::Null) => {
                    tracing::debug!("remote settings empty");
                },
                Ok(payload) => match validate_settings(&payload) {
                    Ok(settings) => return Some((settings, LoadSource::Remote)),
                    Err(error) => {
                        tracing::debug!(%error, "remote settings failed revalidation");
                    },
                },
                Err(error) => {
                    tracing::warn!(
                        code = %error.code,
                        error = %error.message,
                        "remote load failed, trying local storage"
                    );
                },
            }
        }

        self.load_local(ctx)
            .await
            .map(|settings| (settings, LoadSource::Local))
    }

    /// [`Self::load`], substituting defaults when nothing is stored.
    pub async fn load_or_default(&self, ctx: &RequestContext) -> Settings {
        self.load(ctx).await.unwrap_or_else(default_settings)
    }

    async fn load_local(&self, ctx: &RequestContext) -> Option<Settings> {
        let raw = match self
            .deps
            .local
            .get_item(ctx, self.options.storage_key.clone())
            .await
        {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(code = %error.code, error = %error.message, "local load failed");
                return None;
            },
        };

        let payload: Value = match serde_json::from_str(&raw) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::debug!(%error, "local settings are not valid JSON");
                return None;
            },
        };

        validate_settings(&payload)
            .map_err(|error| tracing::debug!(%error, "local settings failed revalidation"))
            .ok()
    }

    /// Publish a `settings-updated` event.
    ///
    /// Best effort: publish failures are logged and dropped.
    pub fn broadcast_update(&self, settings: &Settings) {
        let Some(events) = self.deps.events.as_ref() else {
            return;
        };
        let event = SettingsUpdatedEvent::new(settings.clone(), epoch_millis());
        if let Err(error) = events.publish(&event) {
            tracing::warn!(
                code = %error.code,
                error = %error.message,
                "failed to broadcast settings update"
            );
        }
    }

    /// Built-in defaults.
    #[must_use]
    pub fn default_settings(&self) -> Settings {
        default_settings()
    }
}

fn rejection_message(error: &InvalidSettings) -> String {
    match error {
        InvalidSettings::UnsupportedModel { model } => format!("{UNSUPPORTED_MODEL}: {model}"),
        other => format!("{SETTINGS_INVALID}: {other}"),
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_host_locations() {
        let options = SettingsGatewayOptions::default();
        assert_eq!(options.settings_path.as_ref(), "/api/v1/settings/openai");
        assert_eq!(options.storage_key.as_ref(), "braindrive_openai_settings");
    }

    #[test]
    fn epoch_millis_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(epoch_millis() > 1_577_836_800_000);
    }

    #[test]
    fn rejection_names_the_unsupported_model() {
        let error = InvalidSettings::UnsupportedModel {
            model: "my-custom-model".to_string(),
        };
        assert_eq!(rejection_message(&error), "Unsupported model: my-custom-model");
        assert_eq!(
            rejection_message(&InvalidSettings::MissingApiKey),
            "Invalid settings: settings payload has no apiKey"
        );
    }

    #[test]
    fn load_source_labels() {
        assert_eq!(LoadSource::Remote.as_str(), "remote");
        assert_eq!(
            serde_json::to_value(LoadSource::Defaults).ok(),
            Some(Value::String("defaults".into()))
        );
    }
}
