//! User-facing strings shown by the settings form.

/// Shown after a successful connectivity probe.
pub const CONNECTION_SUCCESS: &str = "OpenAI API connection successful";
/// Prefix shown after a failed connectivity probe.
pub const CONNECTION_FAILED: &str = "OpenAI API connection failed";
/// Shown after a successful save.
pub const SETTINGS_SAVED: &str = "Settings saved successfully";
/// Prefix shown when a save names a model outside the allow-list.
pub const UNSUPPORTED_MODEL: &str = "Unsupported model";
/// Prefix shown when a save is refused for any other reason.
pub const SETTINGS_INVALID: &str = "Invalid settings";
/// Shown when stored settings cannot be read.
pub const SETTINGS_LOAD_FAILED: &str = "Failed to load settings";
/// Shown when a save or probe is blocked by field errors.
pub const VALIDATION_ERROR: &str = "Please fix validation errors";
