//! Notification emitted after settings change.

use crate::settings::Settings;
use serde::Serialize;

/// Event name subscribers listen for.
pub const SETTINGS_UPDATED_EVENT: &str = "settings-updated";

/// Payload of the `settings-updated` notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsUpdatedEvent {
    /// Settings as persisted.
    pub settings: Settings,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl SettingsUpdatedEvent {
    /// Build an event stamped with `timestamp`.
    #[must_use]
    pub fn new(settings: Settings, timestamp: u64) -> Self {
        Self {
            settings,
            timestamp,
        }
    }

    /// Event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        SETTINGS_UPDATED_EVENT
    }
}
