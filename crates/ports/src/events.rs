//! Outbound settings notifications.

use openai_settings_domain::SettingsUpdatedEvent;
use openai_settings_shared::Result;

/// Publishes `settings-updated` events to interested listeners.
///
/// Publishing is fire-and-forget; callers log and drop errors.
pub trait SettingsEventPort: Send + Sync {
    /// Deliver one event.
    fn publish(&self, event: &SettingsUpdatedEvent) -> Result<()>;
}
