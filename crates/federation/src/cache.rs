//! Federation cache implementations.
//!
//! Neither implementation evicts: once a domain is discovered its records
//! stay for the lifetime of the store.

use async_trait::async_trait;
use federation_core::{FederationCache, FederationError, FederationRecord, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Persisted cache document: domain to ordered records
pub type CacheDocument = HashMap<String, Vec<FederationRecord>>;

/// Process-local cache
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<CacheDocument>,
}

impl MemoryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of discovered domains
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no domain has been discovered
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl FederationCache for MemoryCache {
    async fn get(&self, domain: &str) -> Result<Vec<FederationRecord>> {
        Ok(self
            .entries
            .read()
            .await
            .get(domain)
            .cloned()
            .unwrap_or_default())
    }

    async fn set(&self, domain: &str, record: FederationRecord) -> Result<()> {
        self.entries
            .write()
            .await
            .entry(domain.to_string())
            .or_default()
            .push(record);
        Ok(())
    }
}

/// Cache persisted as one JSON document, rewritten on every write
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileCache {
    /// Use the document at `path`; it is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the cache document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<CacheDocument> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(CacheDocument::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                FederationError::Cache(format!("{}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CacheDocument::new()),
            Err(e) => Err(FederationError::Cache(format!("{}: {e}", self.path.display()))),
        }
    }

    async fn write_document(&self, document: &CacheDocument) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| FederationError::Cache(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| FederationError::Cache(format!("{}: {e}", parent.display())))?;
            }
        }

        // Readers never observe a partially written document.
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| FederationError::Cache(format!("{}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| FederationError::Cache(format!("{}: {e}", self.path.display())))
    }
}

#[async_trait]
impl FederationCache for JsonFileCache {
    async fn get(&self, domain: &str) -> Result<Vec<FederationRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.remove(domain).unwrap_or_default())
    }

    async fn set(&self, domain: &str, record: FederationRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.entry(domain.to_string()).or_default().push(record);
        self.write_document(&document).await?;
        debug!(domain, path = %self.path.display(), "persisted federation record");
        Ok(())
    }
}
