//! # openai-settings-domain
//!
//! Domain model for the OpenAI settings plugin.
//!
//! - **Models** - the allow-listed `ModelId` values and their display labels
//! - **Settings** - the normalized record and its defaults
//! - **Form** - raw `FormState`, field validation, and normalization
//! - **Revalidation** - parsing of untrusted persisted/remote payloads
//! - **Outcomes** - `SaveOutcome`, `ConnectivityResult`, `SettingsUpdatedEvent`
//! - **Messages** - fixed strings shown by the form
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use openai_settings_shared::shared_crate_version;

pub mod event;
pub mod form;
pub mod messages;
pub mod model;
pub mod outcome;
pub mod revalidate;
pub mod settings;

pub use event::{SETTINGS_UPDATED_EVENT, SettingsUpdatedEvent};
pub use form::{
    CREDENTIAL_FIELDS, FieldErrors, FormField, FormState, has_errors, to_form_state, to_settings,
    validate,
};
pub use model::{DEFAULT_MODEL, ModelId};
pub use outcome::{ConnectivityResult, SaveOutcome};
pub use revalidate::{InvalidSettings, validate_settings};
pub use settings::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, MAX_TEMPERATURE, MAX_TOKENS_LIMIT, MIN_TEMPERATURE,
    MIN_TOKENS_LIMIT, Settings, default_settings,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
