//! In-memory record store adapter.
//!
//! Stands in for the opaque key-value engine the service core is written
//! against. An ordered map makes prefix scans a range walk, matching the
//! `getByPrefix` primitive the domain assumes.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::ports::{RecordStore, RecordStoreError};

/// Process-local [`RecordStore`] over an ordered map.
///
/// Writes are last-write-wins with no versioning, matching the consistency
/// model of the backing engine it stands in for.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<BTreeMap<String, Value>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, RecordStoreError> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), RecordStoreError> {
        let mut records = self.records.write().await;
        records.insert(key.to_owned(), value);
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<Value>, RecordStoreError> {
        let records = self.records.read().await;
        Ok(records
            .range(prefix.to_owned()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, value)| value.clone())
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), RecordStoreError> {
        let mut records = self.records.write().await;
        records.remove(key);
        Ok(())
    }
}
