//! `settings-updated` publisher.

use openai_settings_domain::SETTINGS_UPDATED_EVENT;
use openai_settings_ports::{SettingsEventPort, SettingsUpdatedEvent};
use openai_settings_shared::Result;

/// Writes each event to the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl SettingsEventPort for TracingEventPublisher {
    fn publish(&self, event: &SettingsUpdatedEvent) -> Result<()> {
        tracing::info!(
            event = SETTINGS_UPDATED_EVENT,
            model = %event.settings.model,
            has_organization = event.settings.organization_id.is_some(),
            timestamp = event.timestamp,
            "settings updated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openai_settings_domain::default_settings;

    #[test]
    fn tracing_publisher_accepts_events() -> Result<()> {
        TracingEventPublisher.publish(&SettingsUpdatedEvent::new(default_settings(), 0))?;
        Ok(())
    }
}
