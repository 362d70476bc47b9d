use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::Client;
use serde_json::Value;
use tracing::info;

use crate::{DocumentStore, StoreError};

/// MongoDB-backed document store. `_id` is always a string so fixed
/// well-known ids (the config singleton) and generated ids share one
/// representation.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db_name: String,
}

impl MongoStore {
    /// Parse the URI and build a client handle. The driver connects
    /// lazily; call [`ping`](Self::ping) to verify reachability.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        // Bounded selection timeout so an unreachable MongoDB degrades
        // requests instead of hanging them.
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid MongoDB URI: {}", e)))?;

        info!("MongoDB client configured for database '{}'", db_name);
        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.client.database(&self.db_name).collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let found = self
            .collection(collection)
            .find_one(doc! { "_id": id })
            .await
            .map_err(classify)?;

        found.map(document_to_value).transpose()
    }

    async fn find_active(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let mut cursor = self
            .collection(collection)
            .find(doc! { "isActive": true })
            .sort(doc! { "priority": -1 })
            .await
            .map_err(classify)?;

        let mut docs = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(classify)? {
            docs.push(document_to_value(document)?);
        }
        Ok(docs)
    }

    async fn insert(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
        let id = ObjectId::new().to_hex();
        let mut document = value_to_document(doc)?;
        document.insert("_id", id.as_str());

        self.collection(collection)
            .insert_one(document)
            .await
            .map_err(classify)?;
        Ok(id)
    }

    async fn put(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError> {
        let mut document = value_to_document(doc)?;
        document.insert("_id", id);

        self.collection(collection)
            .replace_one(doc! { "_id": id }, document)
            .upsert(true)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.collection(collection)
            .delete_one(doc! { "_id": id })
            .await
            .map_err(classify)?;
        Ok(())
    }
}

fn classify(err: mongodb::error::Error) -> StoreError {
    use mongodb::error::ErrorKind;
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Query(err.to_string()),
    }
}

fn value_to_document(mut value: Value) -> Result<Document, StoreError> {
    if let Value::Object(map) = &mut value {
        map.remove("id");
    }
    bson::to_document(&value).map_err(|e| StoreError::Decode(e.to_string()))
}

fn document_to_value(mut document: Document) -> Result<Value, StoreError> {
    let id = match document.remove("_id") {
        Some(Bson::String(id)) => Some(id),
        Some(Bson::ObjectId(oid)) => Some(oid.to_hex()),
        _ => None,
    };

    let mut value =
        serde_json::to_value(&document).map_err(|e| StoreError::Decode(e.to_string()))?;
    if let (Value::Object(map), Some(id)) = (&mut value, id) {
        map.insert("id".to_string(), Value::String(id));
    }
    Ok(value)
}
