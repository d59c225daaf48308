//! Plugin manifest published to the BrainDrive host.
//!
//! The host reads two documents when installing the plugin: plugin metadata
//! (identity, bundle location, permissions) and one module definition per
//! renderable component. Both are static apart from the default props, which
//! track `default_settings()`.
#![allow(missing_docs, reason = "field names mirror the host manifest keys")]

use openai_settings_domain::messages::{
    CONNECTION_FAILED, CONNECTION_SUCCESS, SETTINGS_LOAD_FAILED, SETTINGS_SAVED, VALIDATION_ERROR,
};
use openai_settings_domain::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, MAX_TEMPERATURE, MAX_TOKENS_LIMIT,
    MIN_TEMPERATURE, MIN_TOKENS_LIMIT, ModelId, default_settings,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Plugin slug; also the module federation scope.
pub const PLUGIN_SLUG: &str = "BrainDriveOpenAISettings";
/// Published plugin version.
pub const PLUGIN_VERSION: &str = "1.0.0";
/// Host permissions requested at install time.
pub const PLUGIN_PERMISSIONS: [&str; 6] = [
    "storage.read",
    "storage.write",
    "api.access",
    "network.external",
    "settings.read",
    "settings.write",
];

const HOST_SERVICE_VERSION: &str = "1.0.0";
const TEMPERATURE_STEP: f64 = 0.1;

/// Full manifest: plugin metadata plus module definitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginManifest {
    /// Plugin-level metadata.
    pub plugin: PluginMetadata,
    /// Renderable modules.
    pub modules: Vec<ModuleDefinition>,
}

/// Plugin-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    #[serde(rename = "type")]
    pub plugin_type: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub official: bool,
    pub author: &'static str,
    pub compatibility: &'static str,
    pub scope: &'static str,
    pub bundle_method: &'static str,
    pub bundle_location: &'static str,
    pub is_local: bool,
    pub long_description: &'static str,
    pub plugin_slug: &'static str,
    pub source_type: &'static str,
    pub source_url: &'static str,
    pub installation_type: &'static str,
    pub permissions: Vec<&'static str>,
}

/// One module the host can place on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDefinition {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub priority: u32,
    /// Initial props, derived from the default settings.
    pub props: ModuleProps,
    /// Config fields keyed by snake_case name.
    pub config_fields: BTreeMap<&'static str, ConfigField>,
    pub messages: ModuleMessages,
    /// Host services the module calls, keyed by service name.
    pub required_services: BTreeMap<&'static str, RequiredService>,
    pub dependencies: Vec<&'static str>,
    pub layout: ModuleLayout,
    pub tags: Vec<&'static str>,
}

/// Default props handed to the module on first render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProps {
    pub api_key: String,
    pub organization_id: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

/// Input widget type for a config field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFieldType {
    Password,
    Text,
    Select,
    Number,
    Boolean,
}

/// Declarative description of one config field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigField {
    #[serde(rename = "type")]
    pub field_type: ConfigFieldType,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Value>,
}

impl ConfigField {
    const fn new(field_type: ConfigFieldType, description: &'static str) -> Self {
        Self {
            field_type,
            description,
            required: None,
            placeholder: None,
            default: None,
            options: None,
            min: None,
            max: None,
            step: None,
        }
    }
}

/// Value/label pair for select fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// User-facing strings the module shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleMessages {
    pub connection_success: &'static str,
    pub connection_failed: &'static str,
    pub settings_saved: &'static str,
    pub settings_load_failed: &'static str,
    pub validation_error: &'static str,
}

/// A host service and the methods the module calls on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredService {
    pub methods: Vec<&'static str>,
    pub version: &'static str,
}

/// Grid layout constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleLayout {
    pub min_width: u32,
    pub min_height: u32,
    pub default_width: u32,
    pub default_height: u32,
}

/// Build the manifest.
#[must_use]
pub fn plugin_manifest() -> PluginManifest {
    PluginManifest {
        plugin: plugin_metadata(),
        modules: vec![settings_module()],
    }
}

fn plugin_metadata() -> PluginMetadata {
    PluginMetadata {
        name: PLUGIN_SLUG,
        description: "OpenAI Settings Plugin for BrainDrive - Manage OpenAI API configuration",
        version: PLUGIN_VERSION,
        plugin_type: "frontend",
        icon: "Settings",
        category: "settings",
        official: true,
        author: "BrainDrive",
        compatibility: "1.0.0",
        scope: PLUGIN_SLUG,
        bundle_method: "webpack",
        bundle_location: "dist/remoteEntry.js",
        is_local: false,
        long_description: "Configure OpenAI API credentials, select models, and test API \
                           connectivity. Supports organization ids and advanced generation \
                           options; API keys are never shown in full.",
        plugin_slug: PLUGIN_SLUG,
        source_type: "github",
        source_url: env!("CARGO_PKG_REPOSITORY"),
        installation_type: "remote",
        permissions: PLUGIN_PERMISSIONS.to_vec(),
    }
}

fn settings_module() -> ModuleDefinition {
    ModuleDefinition {
        name: PLUGIN_SLUG,
        display_name: "OpenAI Settings",
        description: "Configure and manage OpenAI API credentials and model preferences",
        icon: "Settings",
        category: "settings",
        priority: 1,
        props: default_props(),
        config_fields: config_fields(),
        messages: ModuleMessages {
            connection_success: CONNECTION_SUCCESS,
            connection_failed: CONNECTION_FAILED,
            settings_saved: SETTINGS_SAVED,
            settings_load_failed: SETTINGS_LOAD_FAILED,
            validation_error: VALIDATION_ERROR,
        },
        required_services: required_services(),
        dependencies: Vec::new(),
        layout: ModuleLayout {
            min_width: 6,
            min_height: 8,
            default_width: 8,
            default_height: 10,
        },
        tags: vec![
            "openai",
            "settings",
            "api",
            "configuration",
            "ai",
            "gpt",
            "credentials",
        ],
    }
}

fn default_props() -> ModuleProps {
    let defaults = default_settings();
    ModuleProps {
        api_key: defaults.api_key,
        organization_id: defaults.organization_id.unwrap_or_default(),
        model: defaults.model,
        max_tokens: defaults.max_tokens,
        temperature: defaults.temperature,
    }
}

fn config_fields() -> BTreeMap<&'static str, ConfigField> {
    let mut fields = BTreeMap::new();
    fields.insert(
        "api_key",
        ConfigField {
            required: Some(true),
            placeholder: Some("sk-..."),
            ..ConfigField::new(ConfigFieldType::Password, "Your OpenAI API key")
        },
    );
    fields.insert(
        "organization_id",
        ConfigField {
            required: Some(false),
            placeholder: Some("org-..."),
            ..ConfigField::new(
                ConfigFieldType::Text,
                "Your OpenAI organization ID (optional)",
            )
        },
    );
    fields.insert(
        "model",
        ConfigField {
            required: Some(true),
            default: Some(Value::from(DEFAULT_MODEL.as_str())),
            options: Some(
                ModelId::ALL
                    .into_iter()
                    .map(|model| SelectOption {
                        value: model.as_str(),
                        label: model.label(),
                    })
                    .collect(),
            ),
            ..ConfigField::new(ConfigFieldType::Select, "Default OpenAI model to use")
        },
    );
    fields.insert(
        "max_tokens",
        ConfigField {
            default: Some(Value::from(DEFAULT_MAX_TOKENS)),
            min: Some(Value::from(MIN_TOKENS_LIMIT)),
            max: Some(Value::from(MAX_TOKENS_LIMIT)),
            ..ConfigField::new(ConfigFieldType::Number, "Maximum tokens for responses")
        },
    );
    fields.insert(
        "temperature",
        ConfigField {
            default: Some(Value::from(DEFAULT_TEMPERATURE)),
            min: Some(Value::from(MIN_TEMPERATURE)),
            max: Some(Value::from(MAX_TEMPERATURE)),
            step: Some(Value::from(TEMPERATURE_STEP)),
            ..ConfigField::new(ConfigFieldType::Number, "Response creativity (0-2)")
        },
    );
    fields.insert(
        "enable_connection_testing",
        ConfigField {
            default: Some(Value::Bool(true)),
            ..ConfigField::new(ConfigFieldType::Boolean, "Enable API connection testing")
        },
    );
    fields.insert(
        "auto_save",
        ConfigField {
            default: Some(Value::Bool(false)),
            ..ConfigField::new(
                ConfigFieldType::Boolean,
                "Automatically save settings on change",
            )
        },
    );
    fields
}

fn required_services() -> BTreeMap<&'static str, RequiredService> {
    let service = |methods: &[&'static str]| RequiredService {
        methods: methods.to_vec(),
        version: HOST_SERVICE_VERSION,
    };
    BTreeMap::from([
        ("api", service(&["get", "post", "put", "delete"])),
        (
            "event",
            service(&[
                "sendMessage",
                "subscribeToMessages",
                "unsubscribeFromMessages",
            ]),
        ),
        (
            "theme",
            service(&[
                "getCurrentTheme",
                "addThemeChangeListener",
                "removeThemeChangeListener",
            ]),
        ),
        (
            "settings",
            service(&["getSetting", "setSetting", "getSettingDefinitions"]),
        ),
    ])
}
