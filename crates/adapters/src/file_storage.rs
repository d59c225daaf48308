//! JSON-file backed local storage.
//!
//! The file holds one JSON object mapping keys to string values. Writes go
//! to a sibling temp file first and are renamed into place.

use openai_settings_ports::{BoxFuture, LocalStoragePort};
use openai_settings_shared::{ErrorClass, ErrorCode, ErrorEnvelope, RequestContext, Result};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

type StorageMap = BTreeMap<String, String>;

const NAMESPACE: &str = "storage";

/// Local storage persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Storage at `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<StorageMap> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(StorageMap::new()),
            Err(error) => return Err(self.io_error("read_failed", "failed to read", &error)),
        };
        if raw.trim().is_empty() {
            return Ok(StorageMap::new());
        }
        serde_json::from_str(&raw).map_err(|error| {
            ErrorEnvelope::invariant(
                ErrorCode::new(NAMESPACE, "corrupt"),
                format!("storage file {} is not a JSON object of strings: {error}", self.path.display()),
            )
        })
    }

    async fn write_map(&self, map: &StorageMap) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|error| self.io_error("write_failed", "failed to create directory for", &error))?;
        }
        let mut contents = serde_json::to_string_pretty(map)?;
        contents.push('\n');

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, contents)
            .await
            .map_err(|error| self.io_error("write_failed", "failed to write", &error))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|error| self.io_error("write_failed", "failed to replace", &error))
    }

    /// Read-modify-write under the write lock.
    ///
    /// An unparseable file is replaced rather than blocking every later write.
    async fn update(&self, apply: impl FnOnce(&mut StorageMap) + Send) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(error) if error.code == ErrorCode::new(NAMESPACE, "corrupt") => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %error.message,
                    "replacing unreadable storage file"
                );
                StorageMap::new()
            },
            Err(error) => return Err(error),
        };
        apply(&mut map);
        self.write_map(&map).await
    }

    fn io_error(&self, code: &'static str, action: &str, error: &io::Error) -> ErrorEnvelope {
        let class = if matches!(error.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) {
            ErrorClass::Retriable
        } else {
            ErrorClass::NonRetriable
        };
        ErrorEnvelope::unexpected(
            ErrorCode::new(NAMESPACE, code),
            format!("{action} {}: {error}", self.path.display()),
            class,
        )
        .with_metadata("path", self.path.display().to_string())
    }
}

impl LocalStoragePort for JsonFileStorage {
    fn get_item(
        &self,
        _ctx: &RequestContext,
        key: Box<str>,
    ) -> BoxFuture<'_, Result<Option<String>>> {
        Box::pin(async move { Ok(self.read_map().await?.remove(key.as_ref())) })
    }

    fn set_item(
        &self,
        _ctx: &RequestContext,
        key: Box<str>,
        value: String,
    ) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.update(|map| {
                map.insert(key.into(), value);
            })
            .await
        })
    }

    fn remove_item(&self, _ctx: &RequestContext, key: Box<str>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.update(|map| {
                map.remove(key.as_ref());
            })
            .await
        })
    }
}
