//! Integration tests for shared error propagation.

use openai_settings_shared::{ErrorClass, ErrorCode, ErrorKind};
use openai_settings_testkit::errors::{
    api_error, remote_unavailable_error, storage_write_error, transport_error,
};

#[test]
fn error_envelope_crosses_crates() {
    let remote = remote_unavailable_error();
    assert!(remote.is_namespace("remote"));
    assert!(remote.class.is_retriable());

    let boxed: Box<dyn std::error::Error> = Box::new(remote);
    assert!(boxed.to_string().contains("remote:http_status"));
}

#[test]
fn fixtures_match_adapter_taxonomy() {
    let api = api_error("Invalid API key", 401);
    assert_eq!(api.kind, ErrorKind::Expected);
    assert_eq!(api.code, ErrorCode::new("connectivity", "api_error"));
    assert_eq!(api.metadata.get("status").map(String::as_str), Some("401"));

    let transport = transport_error("connection refused");
    assert_eq!(transport.class, ErrorClass::Retriable);

    assert!(storage_write_error().is_namespace("storage"));
}
