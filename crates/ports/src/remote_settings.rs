//! Remote key-value settings store (the host platform's settings API).

use crate::BoxFuture;
use openai_settings_shared::{RequestContext, Result};
use serde_json::Value;

/// Remote settings persistence.
///
/// Every error is treated as "remote unavailable" by the gateway, which then
/// falls back to local storage.
pub trait RemoteSettingsPort: Send + Sync {
    /// Read the payload stored at `path`, already unwrapped from any
    /// response envelope.
    fn get(&self, ctx: &RequestContext, path: Box<str>) -> BoxFuture<'_, Result<Value>>;

    /// Write `body` to `path`.
    fn post(&self, ctx: &RequestContext, path: Box<str>, body: Value)
    -> BoxFuture<'_, Result<()>>;
}
