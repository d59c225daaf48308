//! OpenAI "list models" adapter used for connectivity probes.

use super::{build_client, map_transport_error, normalize_base_url};
use openai_settings_ports::{BoxFuture, ListModelsRequest, ModelListingPort};
use openai_settings_shared::{ErrorClass, ErrorCode, ErrorEnvelope, RequestContext, Result};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

/// Default provider base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Header carrying the optional organization id.
pub const OPENAI_ORGANIZATION_HEADER: &str = "openai-organization";

const NAMESPACE: &str = "connectivity";

/// Model catalog configuration.
#[derive(Debug, Clone, Default)]
pub struct OpenAiModelCatalogConfig {
    /// Base URL override (defaults to `https://api.openai.com/v1`).
    pub base_url: Option<Box<str>>,
    /// Total request timeout; `None` keeps the transport default.
    pub timeout_ms: Option<u64>,
}

/// `GET /models` client.
///
/// Credentials are per call, so the client carries no default auth header.
#[derive(Debug, Clone)]
pub struct OpenAiModelCatalog {
    client: reqwest::Client,
    endpoint: Box<str>,
}

impl OpenAiModelCatalog {
    /// Create a catalog client.
    pub fn new(config: &OpenAiModelCatalogConfig) -> Result<Self> {
        let base_url = normalize_base_url(
            "openai",
            config.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_BASE_URL),
        )?;
        let client = build_client(NAMESPACE, config.timeout_ms, HeaderMap::new())?;
        Ok(Self {
            client,
            endpoint: format!("{base_url}/models").into_boxed_str(),
        })
    }

    /// Endpoint the probe calls.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, ctx: &RequestContext, request: ListModelsRequest) -> Result<Vec<String>> {
        let headers = request_headers(&request)?;
        tracing::debug!(
            correlation_id = %ctx.correlation_id(),
            endpoint = %self.endpoint,
            api_key = %request.api_key.sanitized(),
            with_organization = request.organization_id.is_some(),
            "probing model listing"
        );

        let response = self
            .client
            .get(self.endpoint.as_ref())
            .headers(headers)
            .send()
            .await
            .map_err(|error| map_transport_error(NAMESPACE, &error))?;

        let status = response.status();
        let payload = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(NAMESPACE, &error))?;

        if !status.is_success() {
            return Err(map_openai_http_error(status, &payload));
        }

        let parsed: ModelListResponse = serde_json::from_slice(&payload).map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::new(NAMESPACE, "invalid_response"),
                format!("failed to decode model list: {error}"),
                ErrorClass::NonRetriable,
            )
        })?;
        Ok(parsed.data.into_iter().map(|model| model.id).collect())
    }
}

impl ModelListingPort for OpenAiModelCatalog {
    fn list_models(
        &self,
        ctx: &RequestContext,
        request: ListModelsRequest,
    ) -> BoxFuture<'_, Result<Vec<String>>> {
        let ctx = ctx.clone();
        Box::pin(async move { self.fetch(&ctx, request).await })
    }
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<serde_json::Value>,
}

fn request_headers(request: &ListModelsRequest) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", request.api_key.expose()))
        .map_err(|_| invalid_header("api key"))?;
    auth_header.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_header);

    if let Some(organization_id) = request.organization_id.as_deref() {
        let value = HeaderValue::from_str(organization_id)
            .map_err(|_| invalid_header("organization id"))?;
        headers.insert(HeaderName::from_static(OPENAI_ORGANIZATION_HEADER), value);
    }
    Ok(headers)
}

fn invalid_header(label: &str) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new(NAMESPACE, "invalid_header"),
        format!("{label} contains invalid header characters"),
    )
}

fn map_openai_http_error(status: StatusCode, payload: &[u8]) -> ErrorEnvelope {
    let class = if status.as_u16() == 429 || status.is_server_error() {
        ErrorClass::Retriable
    } else {
        ErrorClass::NonRetriable
    };
    let code = ErrorCode::new(NAMESPACE, "api_error");

    let mut envelope = match serde_json::from_slice::<OpenAiErrorResponse>(payload) {
        Ok(parsed) => {
            let mut envelope = if status.is_client_error() && class == ErrorClass::NonRetriable {
                ErrorEnvelope::expected(code, parsed.error.message)
            } else {
                ErrorEnvelope::unexpected(code, parsed.error.message, class)
            };
            if let Some(error_type) = parsed.error.error_type {
                envelope = envelope.with_metadata("error_type", error_type);
            }
            match parsed.error.code {
                Some(serde_json::Value::String(value)) => {
                    envelope = envelope.with_metadata("error_code", value);
                },
                Some(serde_json::Value::Number(value)) => {
                    envelope = envelope.with_metadata("error_code", value.to_string());
                },
                _ => {},
            }
            envelope
        },
        Err(_) => ErrorEnvelope::unexpected(code, status_fallback_message(status), class),
    };

    envelope = envelope.with_metadata("status", status.as_u16().to_string());
    envelope
}

fn status_fallback_message(status: StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}
