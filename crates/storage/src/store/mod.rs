//! Document store adapter.
//!
//! Records are schema-flexible JSON objects addressed by collection name and
//! a store-assigned [`Uuid`]. The HTTP layer never talks to a backend
//! directly: it receives a [`Database`] handle at construction and goes
//! through the [`DocumentStore`] trait.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{Result, StorageError};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// JSON object body of a stored document.
pub type Body = Map<String, Value>;

/// A stored record: its immutable id plus the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub body: Body,
}

impl Document {
    pub fn new(id: Uuid, body: Body) -> Self {
        Self { id, body }
    }
}

/// Converts an arbitrary JSON value into a document body.
///
/// Only JSON objects can be stored; anything else is rejected.
pub fn into_body(value: Value) -> Result<Body> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection, in store-defined (insertion) order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Document>;

    /// Persists a new document; the store assigns its id.
    async fn insert(&self, collection: &str, body: Body) -> Result<Document>;

    async fn insert_many(&self, collection: &str, bodies: Vec<Body>) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(bodies.len());
        for body in bodies {
            documents.push(self.insert(collection, body).await?);
        }
        Ok(documents)
    }

    /// Shallow merge of `patch` into the top-level keys of the stored body.
    async fn merge(&self, collection: &str, id: Uuid, patch: Body) -> Result<Document>;

    async fn delete(&self, collection: &str, id: Uuid) -> Result<()>;

    /// Removes every document of a collection, returning how many were removed.
    async fn delete_all(&self, collection: &str) -> Result<u64>;

    async fn run_migrations(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {}
}

/// Process-wide handle to the configured document store.
///
/// Cheap to clone; every clone shares the same underlying connection.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    /// Connects to the backend selected by the URL scheme:
    /// `postgres://` / `postgresql://` or `memory://`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let scheme = url
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or_default();

        match scheme {
            "postgres" | "postgresql" => {
                let store = PgStore::connect(url, max_connections).await?;
                Ok(Self::from_store(store))
            }
            "memory" => Ok(Self::in_memory()),
            _ => Err(StorageError::Connection(format!(
                "unsupported database URL scheme '{}'",
                scheme
            ))),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(MemoryStore::new())
    }

    pub fn from_store(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub async fn run_migrations(&self) -> Result<()> {
        self.store.run_migrations().await
    }

    pub async fn close(&self) {
        self.store.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_body_accepts_objects() {
        let body = into_body(json!({ "name": "Alex" })).unwrap();
        assert_eq!(body.get("name"), Some(&json!("Alex")));
    }

    #[test]
    fn test_into_body_rejects_non_objects() {
        let err = into_body(json!(["Alex"])).unwrap_err();
        assert!(matches!(err, StorageError::InvalidDocument(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[tokio::test]
    async fn test_connect_memory_scheme() {
        let db = Database::connect("memory://", 1).await.unwrap();
        db.run_migrations().await.unwrap();
        assert!(db.store().find_all("athletes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = Database::connect("mongodb://localhost:27017", 1).await;
        assert!(matches!(result, Err(StorageError::Connection(_))));
    }
}
