use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::{DocumentStore, StoreError};

/// In-memory document store. Collections are insertion-ordered vectors so
/// priority ties keep store order, matching the contract the services
/// rely on. The `unavailable` switch makes every operation fail, which is
/// how tests exercise the degrade-to-empty and default-config paths.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(String, Value)>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store marked unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn with_id(id: &str, doc: &Value) -> Value {
        let mut doc = doc.clone();
        if let Value::Object(map) = &mut doc {
            map.insert("id".to_string(), Value::String(id.to_string()));
        }
        doc
    }

    fn strip_id(mut doc: Value) -> Value {
        if let Value::Object(map) = &mut doc {
            map.remove("id");
        }
        doc
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        self.check_available()?;
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Query("lock poisoned".to_string()))?;

        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(doc_id, doc)| Self::with_id(doc_id, doc))
        }))
    }

    async fn find_active(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        self.check_available()?;
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Query("lock poisoned".to_string()))?;

        let mut docs: Vec<Value> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| {
                        doc.get("isActive").and_then(Value::as_bool).unwrap_or(false)
                    })
                    .map(|(id, doc)| Self::with_id(id, doc))
                    .collect()
            })
            .unwrap_or_default();

        // Stable sort: equal priorities stay in insertion order.
        docs.sort_by_key(|doc| {
            std::cmp::Reverse(doc.get("priority").and_then(Value::as_i64).unwrap_or(0))
        });
        Ok(docs)
    }

    async fn insert(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
        self.check_available()?;
        let id = Uuid::new_v4().to_string();
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Query("lock poisoned".to_string()))?;

        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), Self::strip_id(doc)));
        Ok(id)
    }

    async fn put(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError> {
        self.check_available()?;
        let doc = Self::strip_id(doc);
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Query("lock poisoned".to_string()))?;

        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some((_, existing)) => *existing = doc,
            None => docs.push((id.to_string(), doc)),
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check_available()?;
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Query("lock poisoned".to_string()))?;

        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|(doc_id, _)| doc_id != id);
        }
        Ok(())
    }
}
