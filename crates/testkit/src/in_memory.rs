//! In-memory adapter implementations for port contracts.
//!
//! Each double records what it was asked to do and can be switched into a
//! failing mode, so gateway fallbacks can be driven deterministically.

use crate::errors::{remote_unavailable_error, storage_write_error};
use openai_settings_ports::{
    BoxFuture, ListModelsRequest, LocalStoragePort, ModelListingPort, RemoteSettingsPort,
    SettingsEventPort, SettingsUpdatedEvent,
};
use openai_settings_shared::{ErrorCode, ErrorEnvelope, RequestContext, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Remote settings store keyed by path.
#[derive(Debug, Default)]
pub struct InMemoryRemoteSettings {
    entries: RwLock<BTreeMap<String, Value>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryRemoteSettings {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail with a 503-style error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail with a 503-style error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a payload.
    pub async fn insert(&self, path: &str, value: Value) {
        self.entries.write().await.insert(path.to_string(), value);
    }

    /// Stored payload for `path`.
    pub async fn stored(&self, path: &str) -> Option<Value> {
        self.entries.read().await.get(path).cloned()
    }

    /// Read attempts so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Write attempts so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl RemoteSettingsPort for InMemoryRemoteSettings {
    fn get(&self, _ctx: &RequestContext, path: Box<str>) -> BoxFuture<'_, Result<Value>> {
        Box::pin(async move {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(remote_unavailable_error());
            }
            Ok(self
                .entries
                .read()
                .await
                .get(path.as_ref())
                .cloned()
                .unwrap_or(Value::Null))
        })
    }

    fn post(
        &self,
        _ctx: &RequestContext,
        path: Box<str>,
        body: Value,
    ) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(remote_unavailable_error());
            }
            self.entries.write().await.insert(path.into(), body);
            Ok(())
        })
    }
}

/// Local key-value storage held in a map.
#[derive(Debug, Default)]
pub struct InMemoryLocalStorage {
    items: Mutex<BTreeMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryLocalStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make reads fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make writes fail with a disk-full error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a raw value, bypassing failure toggles.
    pub fn seed(&self, key: &str, value: &str) {
        locked(&self.items).insert(key.to_string(), value.to_string());
    }

    /// Raw value for `key`, bypassing failure toggles.
    pub fn peek(&self, key: &str) -> Option<String> {
        locked(&self.items).get(key).cloned()
    }

    /// Successful or failed write attempts so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl LocalStoragePort for InMemoryLocalStorage {
    fn get_item(
        &self,
        _ctx: &RequestContext,
        key: Box<str>,
    ) -> BoxFuture<'_, Result<Option<String>>> {
        Box::pin(async move {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::new("storage", "read_failed"),
                    "storage unavailable",
                ));
            }
            Ok(self.peek(&key))
        })
    }

    fn set_item(
        &self,
        _ctx: &RequestContext,
        key: Box<str>,
        value: String,
    ) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(storage_write_error());
            }
            self.seed(&key, &value);
            Ok(())
        })
    }

    fn remove_item(&self, _ctx: &RequestContext, key: Box<str>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(storage_write_error());
            }
            locked(&self.items).remove(key.as_ref());
            Ok(())
        })
    }
}

/// Event publisher that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<SettingsUpdatedEvent>>,
    fail: AtomicBool,
}

impl RecordingEventPublisher {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make publishing fail.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Events published so far.
    pub fn events(&self) -> Vec<SettingsUpdatedEvent> {
        locked(&self.events).clone()
    }
}

impl SettingsEventPort for RecordingEventPublisher {
    fn publish(&self, event: &SettingsUpdatedEvent) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ErrorEnvelope::expected(
                ErrorCode::new("events", "publish_failed"),
                "listener rejected event",
            ));
        }
        locked(&self.events).push(event.clone());
        Ok(())
    }
}

/// Model listing that returns a canned answer and records requests.
#[derive(Debug)]
pub struct StaticModelListing {
    response: Mutex<Result<Vec<String>>>,
    requests: Mutex<Vec<ListModelsRequest>>,
}

impl StaticModelListing {
    /// Always answer with `models`.
    pub fn with_models<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            response: Mutex::new(Ok(models.into_iter().map(Into::into).collect())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: ErrorEnvelope) -> Self {
        Self {
            response: Mutex::new(Err(error)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replace the canned answer.
    pub fn respond_with(&self, response: Result<Vec<String>>) {
        *locked(&self.response) = response;
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ListModelsRequest> {
        locked(&self.requests).clone()
    }
}

impl ModelListingPort for StaticModelListing {
    fn list_models(
        &self,
        _ctx: &RequestContext,
        request: ListModelsRequest,
    ) -> BoxFuture<'_, Result<Vec<String>>> {
        locked(&self.requests).push(request);
        let response = locked(&self.response).clone();
        Box::pin(async move { response })
    }
}
