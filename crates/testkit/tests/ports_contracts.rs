//! Contract-style tests for port traits using in-memory adapters.

use openai_settings_domain::default_settings;
use openai_settings_ports::{
    ListModelsRequest, LocalStoragePort, ModelListingPort, RemoteSettingsPort, SettingsEventPort,
    SettingsUpdatedEvent,
};
use openai_settings_shared::{RequestContext, Result};
use openai_settings_testkit::errors::api_error;
use openai_settings_testkit::in_memory::{
    InMemoryLocalStorage, InMemoryRemoteSettings, RecordingEventPublisher, StaticModelListing,
};
use serde_json::{Value, json};

#[tokio::test]
async fn remote_settings_contract_smoke() -> Result<()> {
    let ctx = RequestContext::new_request();
    let remote = InMemoryRemoteSettings::new();

    assert_eq!(remote.get(&ctx, "/settings".into()).await?, Value::Null);
    remote
        .post(&ctx, "/settings".into(), json!({"apiKey": "sk"}))
        .await?;
    assert_eq!(remote.get(&ctx, "/settings".into()).await?, json!({"apiKey": "sk"}));

    remote.fail_writes(true);
    assert!(remote.post(&ctx, "/settings".into(), json!({})).await.is_err());
    assert_eq!(remote.write_count(), 2);
    assert_eq!(remote.stored("/settings").await, Some(json!({"apiKey": "sk"})));
    Ok(())
}

#[tokio::test]
async fn local_storage_contract_smoke() -> Result<()> {
    let ctx = RequestContext::new_request();
    let storage = InMemoryLocalStorage::new();
    assert_eq!(storage.get_item(&ctx, "k".into()).await?, None);
    storage.set_item(&ctx, "k".into(), "v".to_string()).await?;
    assert_eq!(
        storage.get_item(&ctx, "k".into()).await?.as_deref(),
        Some("v")
    );
    storage.remove_item(&ctx, "k".into()).await?;
    assert_eq!(storage.get_item(&ctx, "k".into()).await?, None);

    storage.fail_writes(true);
    assert!(
        storage
            .set_item(&ctx, "k".into(), "v".to_string())
            .await
            .is_err()
    );
    Ok(())
}

#[test]
fn event_publisher_contract_smoke() -> Result<()> {
    let publisher = RecordingEventPublisher::new();
    publisher.publish(&SettingsUpdatedEvent::new(default_settings(), 42))?;
    let events = publisher.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].timestamp, 42);
    assert_eq!(events[0].name(), "settings-updated");
    Ok(())
}

#[tokio::test]
async fn model_listing_contract_smoke() -> Result<()> {
    let ctx = RequestContext::new_request();
    let listing = StaticModelListing::with_models(["gpt-4o", "gpt-4"]);
    let models = listing
        .list_models(&ctx, ListModelsRequest::new("sk-a", Some("org")))
        .await?;
    assert_eq!(models, vec!["gpt-4o", "gpt-4"]);
    assert_eq!(listing.requests()[0].organization_id.as_deref(), Some("org"));

    listing.respond_with(Err(api_error("Invalid API key", 401)));
    let error = listing
        .list_models(&ctx, ListModelsRequest::new("sk-b", None))
        .await
        .err();
    assert_eq!(error.map(|error| error.message), Some("Invalid API key".to_string()));
    Ok(())
}
