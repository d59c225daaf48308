//! Live connectivity check against the provider's model listing.

use openai_settings_domain::ConnectivityResult;
use openai_settings_ports::{ListModelsRequest, ModelListingPort};
use openai_settings_shared::RequestContext;
use std::sync::Arc;

/// Runs single-attempt connectivity probes.
#[derive(Clone)]
pub struct ConnectionProber {
    catalog: Arc<dyn ModelListingPort>,
}

impl ConnectionProber {
    /// Wrap a model listing adapter.
    #[must_use]
    pub fn new(catalog: Arc<dyn ModelListingPort>) -> Self {
        Self { catalog }
    }

    /// Probe the provider with the given credentials.
    ///
    /// Failures are folded into the result; the error detail is the
    /// adapter's message (provider `error.message`, status line, or
    /// transport error text).
    #[tracing::instrument(
        name = "prober.test_connection",
        skip_all,
        fields(correlation_id = %ctx.correlation_id())
    )]
    pub async fn test_connection(
        &self,
        ctx: &RequestContext,
        api_key: &str,
        organization_id: Option<&str>,
    ) -> ConnectivityResult {
        let request = ListModelsRequest::new(api_key, organization_id);
        match self.catalog.list_models(ctx, request).await {
            Ok(models) => {
                tracing::info!(models = models.len(), "connectivity probe succeeded");
                ConnectivityResult::succeeded(models)
            },
            Err(error) => {
                tracing::warn!(
                    code = %error.code,
                    error = %error.message,
                    "connectivity probe failed"
                );
                ConnectivityResult::failed(error.message)
            },
        }
    }
}
