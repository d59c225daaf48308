//! # openai-settings-adapters
//!
//! Adapter implementations for ports (remote settings API, provider model
//! listing, local file storage, event publishers).
//! This crate depends on `ports`, `domain`, and `shared`.

/// HTTP adapters.
#[cfg(any(feature = "openai", feature = "braindrive-api"))]
pub mod http;

pub mod events;
pub mod file_storage;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
