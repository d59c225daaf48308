//! Local string key-value storage used as the fallback backend.

use crate::BoxFuture;
use openai_settings_shared::{RequestContext, Result};

/// String storage, modelled on browser `localStorage`.
pub trait LocalStoragePort: Send + Sync {
    /// Value stored under `key`, if any.
    fn get_item(&self, ctx: &RequestContext, key: Box<str>)
    -> BoxFuture<'_, Result<Option<String>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(
        &self,
        ctx: &RequestContext,
        key: Box<str>,
        value: String,
    ) -> BoxFuture<'_, Result<()>>;

    /// Remove `key`; removing a missing key is not an error.
    fn remove_item(&self, ctx: &RequestContext, key: Box<str>) -> BoxFuture<'_, Result<()>>;
}
