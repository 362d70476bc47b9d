pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("malformed document: {0}")]
    Decode(String),
}

/// Schemaless document persistence, keyed per collection by opaque string
/// ids. Documents are camelCase JSON objects; implementations strip any
/// `id` key on write and inject it on read, so a document at rest never
/// duplicates its key.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read. `Ok(None)` when the id is absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Equality filter on `isActive == true`, ordered by `priority`
    /// descending. Ties keep store order.
    async fn find_active(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Insert under a store-generated id, returned to the caller.
    async fn insert(&self, collection: &str, doc: Value) -> Result<String, StoreError>;

    /// Full-document upsert at a known id.
    async fn put(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError>;

    /// Idempotent: deleting an absent id is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
