//! # openai-settings-api
//!
//! API data transfer objects, JSON Schema exports, and the plugin manifest.
//! This crate depends only on `domain` and `shared`.

pub mod manifest;
/// API v1 DTOs.
pub mod v1;

pub use manifest::{ModuleDefinition, PluginManifest, PluginMetadata, plugin_manifest};

/// Returns the api crate version.
#[must_use]
pub const fn api_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use openai_settings_domain::domain_crate_version;
    use openai_settings_shared::shared_crate_version;

    #[test]
    fn api_crate_compiles() {
        let version = api_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn api_can_use_domain_and_shared() {
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
