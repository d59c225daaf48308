//! BrainDrive settings API client.

use super::{build_client, map_transport_error, normalize_base_url};
use openai_settings_ports::{BoxFuture, RemoteSettingsPort};
use openai_settings_shared::{
    ErrorClass, ErrorCode, ErrorEnvelope, RequestContext, Result, SecretString,
};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

const NAMESPACE: &str = "remote";

/// Remote settings API configuration.
#[derive(Debug, Clone)]
pub struct BrainDriveApiConfig {
    /// Host API base URL, e.g. `http://localhost:8005`.
    pub base_url: Box<str>,
    /// Total request timeout; `None` keeps the transport default.
    pub timeout_ms: Option<u64>,
    /// Bearer token for the host API.
    pub auth_token: Option<SecretString>,
}

/// Settings API client backed by reqwest.
#[derive(Debug, Clone)]
pub struct BrainDriveSettingsClient {
    client: reqwest::Client,
    base_url: Box<str>,
}

impl BrainDriveSettingsClient {
    /// Create a client.
    pub fn new(config: &BrainDriveApiConfig) -> Result<Self> {
        let base_url = normalize_base_url("settings api", &config.base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(token) = config.auth_token.as_ref().filter(|token| !token.is_blank()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
                .map_err(|_| {
                    ErrorEnvelope::expected(
                        ErrorCode::invalid_input(),
                        "settings api token contains invalid header characters",
                    )
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = build_client(NAMESPACE, config.timeout_ms, headers)?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn fetch(&self, ctx: &RequestContext, path: &str) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(correlation_id = %ctx.correlation_id(), %url, "reading remote settings");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| map_transport_error(NAMESPACE, &error))?;
        let status = response.status();
        let payload = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(NAMESPACE, &error))?;
        if !status.is_success() {
            return Err(status_error(status, path));
        }

        let body: Value = serde_json::from_slice(&payload).map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::new(NAMESPACE, "invalid_response"),
                format!("failed to decode settings response: {error}"),
                ErrorClass::NonRetriable,
            )
        })?;
        Ok(unwrap_data(body))
    }

    async fn store(&self, ctx: &RequestContext, path: &str, body: Value) -> Result<()> {
        let url = self.url(path);
        tracing::debug!(correlation_id = %ctx.correlation_id(), %url, "writing remote settings");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|error| map_transport_error(NAMESPACE, &error))?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, path));
        }
        Ok(())
    }
}

impl RemoteSettingsPort for BrainDriveSettingsClient {
    fn get(&self, ctx: &RequestContext, path: Box<str>) -> BoxFuture<'_, Result<Value>> {
        let ctx = ctx.clone();
        Box::pin(async move { self.fetch(&ctx, &path).await })
    }

    fn post(
        &self,
        ctx: &RequestContext,
        path: Box<str>,
        body: Value,
    ) -> BoxFuture<'_, Result<()>> {
        let ctx = ctx.clone();
        Box::pin(async move { self.store(&ctx, &path, body).await })
    }
}

/// Responses may wrap the payload as `{ "data": ... }`.
fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut object) if object.contains_key("data") => {
            object.remove("data").unwrap_or(Value::Null)
        },
        other => other,
    }
}

fn status_error(status: StatusCode, path: &str) -> ErrorEnvelope {
    let class = if status.is_server_error() || status.as_u16() == 429 {
        ErrorClass::Retriable
    } else {
        ErrorClass::NonRetriable
    };
    let code = if status == StatusCode::NOT_FOUND {
        ErrorCode::new(NAMESPACE, "not_found")
    } else {
        ErrorCode::new(NAMESPACE, "http_status")
    };
    ErrorEnvelope::unexpected(
        code,
        format!("settings api returned HTTP {}", status.as_u16()),
        class,
    )
    .with_metadata("status", status.as_u16().to_string())
    .with_metadata("path", path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_envelope_is_unwrapped() {
        assert_eq!(
            unwrap_data(json!({"data": {"apiKey": "sk"}})),
            json!({"apiKey": "sk"})
        );
        assert_eq!(unwrap_data(json!({"apiKey": "sk"})), json!({"apiKey": "sk"}));
        assert_eq!(unwrap_data(json!({"data": null})), Value::Null);
    }

    #[test]
    fn url_joins_with_or_without_leading_slash() -> Result<()> {
        let client = BrainDriveSettingsClient::new(&BrainDriveApiConfig {
            base_url: "http://localhost:8005/".into(),
            timeout_ms: Some(5_000),
            auth_token: None,
        })?;
        assert_eq!(
            client.url("/api/v1/settings/openai"),
            "http://localhost:8005/api/v1/settings/openai"
        );
        assert_eq!(client.url("settings"), "http://localhost:8005/settings");
        Ok(())
    }

    #[test]
    fn status_errors_carry_metadata() {
        let error = status_error(StatusCode::SERVICE_UNAVAILABLE, "/s");
        assert!(error.is_namespace("remote"));
        assert!(error.class.is_retriable());
        assert_eq!(error.metadata.get("status").map(String::as_str), Some("503"));

        let missing = status_error(StatusCode::NOT_FOUND, "/s");
        assert_eq!(missing.code.code(), "not_found");
    }
}
