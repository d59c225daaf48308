//! JSON Schema exports for API v1 DTOs.

use crate::v1::{ApiV1FormStateDto, ApiV1SettingsDto};
use schemars::{Schema, schema_for};

/// JSON Schema for `ApiV1SettingsDto`.
#[must_use]
pub fn api_v1_settings_schema() -> Schema {
    schema_for!(ApiV1SettingsDto)
}

/// JSON Schema for `ApiV1FormStateDto`.
#[must_use]
pub fn api_v1_form_state_schema() -> Schema {
    schema_for!(ApiV1FormStateDto)
}
