//! In-process document store
//!
//! Collections are insertion-ordered vectors behind a single `RwLock`.
//! Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{Document, DocumentStore, Fields, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn not_found(collection: &str, id: &str) -> StoreError {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard.get(collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn add(&self, collection: &str, mut fields: Fields) -> Result<String, StoreError> {
        let id = Self::generate_id();
        fields.remove("id");

        let mut guard = self.collections.write().await;
        guard
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));

        debug!(collection, id = %id, "Document added");
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<(), StoreError> {
        let mut guard = self.collections.write().await;
        let doc = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| Self::not_found(collection, id))?;

        for (key, value) in patch {
            if key != "id" {
                doc.data.insert(key, value);
            }
        }

        debug!(collection, id, "Document updated");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut guard = self.collections.write().await;
        let docs = guard
            .get_mut(collection)
            .ok_or_else(|| Self::not_found(collection, id))?;

        let position = docs
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| Self::not_found(collection, id))?;
        docs.remove(position);

        debug!(collection, id, "Document deleted");
        Ok(())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.data.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
