//! Provider "list models" capability used for connectivity probes.

use crate::BoxFuture;
use openai_settings_shared::{RequestContext, Result, SecretString};

/// Credentials for one probe.
#[derive(Debug, Clone)]
pub struct ListModelsRequest {
    /// Bearer token.
    pub api_key: SecretString,
    /// Sent as `OpenAI-Organization` when present.
    pub organization_id: Option<Box<str>>,
}

impl ListModelsRequest {
    /// Build a request; a blank organization id counts as absent.
    pub fn new(api_key: impl Into<SecretString>, organization_id: Option<&str>) -> Self {
        let organization_id = organization_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(Box::from);
        Self {
            api_key: api_key.into(),
            organization_id,
        }
    }
}

/// Lists the model ids visible to a set of credentials.
///
/// Errors use the `connectivity` namespace: `transport` for network
/// failures, `api_error` for non-success statuses (message taken from the
/// provider's error body), `invalid_response` for undecodable bodies.
pub trait ModelListingPort: Send + Sync {
    /// Model ids in the order the provider returned them.
    fn list_models(
        &self,
        ctx: &RequestContext,
        request: ListModelsRequest,
    ) -> BoxFuture<'_, Result<Vec<String>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_organization_is_dropped() {
        let request = ListModelsRequest::new("sk-test", Some("   "));
        assert!(request.organization_id.is_none());

        let request = ListModelsRequest::new("sk-test", Some(" abc "));
        assert_eq!(request.organization_id.as_deref(), Some("abc"));
    }
}
