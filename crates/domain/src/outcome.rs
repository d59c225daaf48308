//! Result records returned to the form layer.

use serde::{Deserialize, Serialize};

/// Message for a successful remote save.
pub const SAVED_REMOTELY: &str = "Settings saved successfully";
/// Message for a save that fell back to local storage.
pub const SAVED_LOCALLY: &str = "Settings saved to local storage";
/// Message for a successful connectivity probe.
pub const CONNECTION_SUCCESSFUL: &str = "Connection successful";
/// Message for a failed connectivity probe.
pub const CONNECTION_FAILED: &str = "Connection failed";

/// Outcome of a gateway save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// Whether any backend accepted the write.
    pub success: bool,
    /// User-facing message.
    pub message: String,
}

impl SaveOutcome {
    /// Remote backend accepted the write.
    #[must_use]
    pub fn saved_remotely() -> Self {
        Self {
            success: true,
            message: SAVED_REMOTELY.to_string(),
        }
    }

    /// Remote failed, local fallback accepted the write.
    #[must_use]
    pub fn saved_locally() -> Self {
        Self {
            success: true,
            message: SAVED_LOCALLY.to_string(),
        }
    }

    /// Every backend failed; `message` is the last backend's error.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityResult {
    /// Whether the provider answered with a model list.
    pub success: bool,
    /// Fixed summary message.
    pub message: String,
    /// Transport or API error detail.
    #[serde(default, rename = "error", skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    /// Model ids in server order.
    #[serde(default, rename = "models", skip_serializing_if = "Option::is_none")]
    pub available_models: Option<Vec<String>>,
}

impl ConnectivityResult {
    /// Successful probe with the provider's model list.
    #[must_use]
    pub fn succeeded(models: Vec<String>) -> Self {
        Self {
            success: true,
            message: CONNECTION_SUCCESSFUL.to_string(),
            error_detail: None,
            available_models: Some(models),
        }
    }

    /// Failed probe with a detail string.
    #[must_use]
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: CONNECTION_FAILED.to_string(),
            error_detail: Some(detail.into()),
            available_models: None,
        }
    }
}
