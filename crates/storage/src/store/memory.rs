use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Body, Document, DocumentStore};
use crate::error::{Result, StorageError};

/// In-process document store. Contents live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Document> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|doc| doc.id == id))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert(&self, collection: &str, body: Body) -> Result<Document> {
        let document = Document::new(Uuid::new_v4(), body);
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn insert_many(&self, collection: &str, bodies: Vec<Body>) -> Result<Vec<Document>> {
        let documents: Vec<Document> = bodies
            .into_iter()
            .map(|body| Document::new(Uuid::new_v4(), body))
            .collect();

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .extend(documents.iter().cloned());

        Ok(documents)
    }

    async fn merge(&self, collection: &str, id: Uuid, patch: Body) -> Result<Document> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|doc| doc.id == id))
            .ok_or(StorageError::NotFound)?;

        document.body.extend(patch);

        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<()> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or(StorageError::NotFound)?;
        let position = documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or(StorageError::NotFound)?;

        documents.remove(position);

        Ok(())
    }

    async fn delete_all(&self, collection: &str) -> Result<u64> {
        let removed = self
            .collections
            .write()
            .await
            .remove(collection)
            .map(|documents| documents.len() as u64)
            .unwrap_or(0);

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::into_body;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Body {
        into_body(value).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let first = store.insert("athletes", body(json!({ "name": "A" }))).await.unwrap();
        let second = store.insert("athletes", body(json!({ "name": "B" }))).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        for name in ["first", "second", "third"] {
            store.insert("athletes", body(json!({ "name": name }))).await.unwrap();
        }

        let names: Vec<_> = store
            .find_all("athletes")
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.body["name"].clone())
            .collect();

        assert_eq!(names, vec![json!("first"), json!("second"), json!("third")]);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        store.insert("athletes", body(json!({ "name": "A" }))).await.unwrap();

        assert!(store.find_all("trainers").await.unwrap().is_empty());
        assert_eq!(store.delete_all("trainers").await.unwrap(), 0);
        assert_eq!(store.find_all("athletes").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_is_shallow_and_keeps_other_keys() {
        let store = MemoryStore::new();
        let doc = store
            .insert("athletes", body(json!({ "name": "Alex", "age": 15 })))
            .await
            .unwrap();

        let merged = store
            .merge("athletes", doc.id, body(json!({ "age": 16 })))
            .await
            .unwrap();

        assert_eq!(merged.id, doc.id);
        assert_eq!(merged.body["name"], json!("Alex"));
        assert_eq!(merged.body["age"], json!(16));
        assert_eq!(store.find_by_id("athletes", doc.id).await.unwrap(), merged);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(store.find_by_id("athletes", id).await.unwrap_err().is_not_found());
        assert!(store.merge("athletes", id, Body::new()).await.unwrap_err().is_not_found());
        assert!(store.delete("athletes", id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_all_reports_removed_count() {
        let store = MemoryStore::new();
        store
            .insert_many(
                "athletes",
                vec![body(json!({ "name": "A" })), body(json!({ "name": "B" }))],
            )
            .await
            .unwrap();

        assert_eq!(store.delete_all("athletes").await.unwrap(), 2);
        assert!(store.find_all("athletes").await.unwrap().is_empty());
    }
}
