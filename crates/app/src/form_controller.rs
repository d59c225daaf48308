//! Form view-model driven by discrete transitions.
//!
//! The controller owns a serializable [`FormViewModel`] and mutates it in
//! response to user intents (`set_field`, `save`, `test_connection`, ...).
//! Rendering is left to whatever surface observes the view-model.

use crate::gateway::SettingsGateway;
use crate::prober::ConnectionProber;
use openai_settings_domain::messages::{CONNECTION_FAILED, CONNECTION_SUCCESS, VALIDATION_ERROR};
use openai_settings_domain::{
    CREDENTIAL_FIELDS, ConnectivityResult, FieldErrors, FormField, FormState, ModelId,
    default_settings, has_errors, to_form_state, to_settings, validate,
};
use openai_settings_shared::RequestContext;
use serde::Serialize;

/// Where the form currently is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    /// Waiting for input.
    #[default]
    Idle,
    /// Reading stored settings.
    Loading,
    /// Input changed; validation pending.
    Validating,
    /// Save in flight.
    Submitting,
    /// Connectivity probe in flight.
    Testing,
    /// Last save or probe finished; see the alert.
    Done,
}

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Informational.
    Info,
}

/// Banner shown above the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Severity.
    pub kind: AlertKind,
    /// Text.
    pub message: String,
}

impl Alert {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }
}

/// Everything a surface needs to render the settings form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormViewModel {
    /// Raw input.
    pub form: FormState,
    /// Current field errors.
    pub errors: FieldErrors,
    /// Lifecycle phase.
    pub phase: FormPhase,
    /// Last alert, if any.
    pub alert: Option<Alert>,
    /// Model ids offered in the selector.
    pub available_models: Vec<String>,
    /// Last probe result.
    pub connection: Option<ConnectivityResult>,
    /// Input changed since the last load or successful save.
    pub dirty: bool,
}

impl Default for FormViewModel {
    fn default() -> Self {
        Self {
            form: to_form_state(&default_settings()),
            errors: FieldErrors::default(),
            phase: FormPhase::Idle,
            alert: None,
            available_models: ModelId::ALL
                .iter()
                .map(|model| model.as_str().to_string())
                .collect(),
            connection: None,
            dirty: false,
        }
    }
}

/// Drives a [`FormViewModel`] through the gateway and prober.
#[derive(Clone)]
pub struct FormController {
    gateway: SettingsGateway,
    prober: ConnectionProber,
    view: FormViewModel,
}

impl FormController {
    /// Controller starting from default settings.
    #[must_use]
    pub fn new(gateway: SettingsGateway, prober: ConnectionProber) -> Self {
        Self {
            gateway,
            prober,
            view: FormViewModel::default(),
        }
    }

    /// Current view-model.
    #[must_use]
    pub const fn view(&self) -> &FormViewModel {
        &self.view
    }

    /// Populate the form from stored settings, or defaults.
    pub async fn load(&mut self, ctx: &RequestContext) {
        self.view.phase = FormPhase::Loading;
        let settings = self.gateway.load_or_default(ctx).await;
        self.view.form = to_form_state(&settings);
        self.view.errors = FieldErrors::default();
        self.view.dirty = false;
        self.view.phase = FormPhase::Idle;
    }

    /// Record a keystroke. Validation runs on [`Self::revalidate`].
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.view.form.set(field, value);
        self.view.dirty = true;
        self.view.phase = FormPhase::Validating;
    }

    /// Recompute field errors for the current input.
    pub fn revalidate(&mut self) -> &FieldErrors {
        self.view.errors = validate(&self.view.form);
        if self.view.phase == FormPhase::Validating {
            self.view.phase = FormPhase::Idle;
        }
        &self.view.errors
    }

    /// Validate and persist the form.
    pub async fn save(&mut self, ctx: &RequestContext) {
        self.view.errors = validate(&self.view.form);
        if has_errors(&self.view.errors) {
            self.view.alert = Some(Alert::error(VALIDATION_ERROR));
            self.view.phase = FormPhase::Idle;
            return;
        }

        self.view.phase = FormPhase::Submitting;
        self.view.alert = None;
        let outcome = self.gateway.save(ctx, &to_settings(&self.view.form)).await;

        if outcome.success {
            self.view.dirty = false;
            self.view.alert = Some(Alert::success(outcome.message));
        } else {
            self.view.alert = Some(Alert::error(outcome.message));
        }
        self.view.phase = FormPhase::Done;
    }

    /// Probe the provider with the credentials currently typed.
    ///
    /// Only the credential fields have to be valid.
    pub async fn test_connection(&mut self, ctx: &RequestContext) {
        self.view.errors = validate(&self.view.form);
        if !self.view.errors.only(&CREDENTIAL_FIELDS).is_empty() {
            self.view.alert = Some(Alert::error(VALIDATION_ERROR));
            self.view.phase = FormPhase::Idle;
            return;
        }

        self.view.phase = FormPhase::Testing;
        self.view.alert = None;
        let settings = to_settings(&self.view.form);
        let result = self
            .prober
            .test_connection(ctx, &settings.api_key, settings.organization_id.as_deref())
            .await;

        if result.success {
            if let Some(models) = result.available_models.as_ref() {
                self.view.available_models.clone_from(models);
            }
            self.view.alert = Some(Alert::success(CONNECTION_SUCCESS));
        } else {
            let detail = result.error_detail.as_deref().unwrap_or(&result.message);
            self.view.alert = Some(Alert::error(format!("{CONNECTION_FAILED}: {detail}")));
        }
        self.view.connection = Some(result);
        self.view.phase = FormPhase::Done;
    }

    /// Replace the input with defaults.
    pub fn reset_to_defaults(&mut self) {
        self.view.form = to_form_state(&self.gateway.default_settings());
        self.view.errors = FieldErrors::default();
        self.view.alert = None;
        self.view.dirty = true;
        self.view.phase = FormPhase::Idle;
    }

    /// Dismiss the current alert.
    pub fn clear_alert(&mut self) {
        self.view.alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_offers_every_allowed_model() {
        let view = FormViewModel::default();
        assert_eq!(view.available_models.len(), ModelId::ALL.len());
        assert_eq!(view.form.model, "gpt-4o");
        assert_eq!(view.form.max_tokens, "4096");
        assert_eq!(view.phase, FormPhase::Idle);
    }

    #[test]
    fn view_model_serializes_camel_case() {
        let value = serde_json::to_value(FormViewModel::default()).unwrap_or_default();
        assert!(value.get("availableModels").is_some());
        assert_eq!(value["phase"], "idle");
        assert_eq!(value["dirty"], false);
        assert!(value["alert"].is_null());
    }
}
