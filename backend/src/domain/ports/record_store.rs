//! Driven port over the key-value record store.
//!
//! The storage engine is an external collaborator: its persistence and
//! indexing are opaque, and the domain only assumes these four primitives.
//! Keys follow the `<kind>:<id>` convention defined in
//! [`crate::domain::records`].

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// The backend failed to execute the operation.
        Backend { message: String } => "record store backend error: {message}",
        /// The backend did not answer in time.
        Timeout { message: String } => "record store timed out: {message}",
    }
}

/// Port over the raw key-value primitives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, RecordStoreError>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<(), RecordStoreError>;

    /// Fetch every value whose key starts with `prefix`, in key order.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<Value>, RecordStoreError>;

    /// Remove the value stored under `key`; succeeds when already absent.
    async fn delete(&self, key: &str) -> Result<(), RecordStoreError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn backend_error_formats_message() {
        let err = RecordStoreError::backend("broken pipe");
        assert!(err.to_string().contains("broken pipe"));
    }

    #[tokio::test]
    async fn mock_store_honours_expectations() {
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .withf(|key| key == "user:u1")
            .returning(|_| Ok(None));
        let found = store.get("user:u1").await.expect("mock lookup");
        assert!(found.is_none());
    }
}
