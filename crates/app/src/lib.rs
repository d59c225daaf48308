//! # openai-settings-app
//!
//! Use cases for the settings plugin: persistence with fallback,
//! connectivity probing, and the form view-model.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod debounce;
pub mod form_controller;
pub mod gateway;
pub mod prober;

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use form_controller::{Alert, AlertKind, FormController, FormPhase, FormViewModel};
pub use gateway::{
    DEFAULT_SETTINGS_PATH, DEFAULT_STORAGE_KEY, LoadSource, SettingsGateway, SettingsGatewayDeps,
    SettingsGatewayOptions,
};
pub use prober::ConnectionProber;
