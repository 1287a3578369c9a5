//! Document store abstraction
//!
//! Every resource lives in a named collection of schema-less JSON documents.
//! The store assigns identifiers on insert; callers never choose them.
//!
//! Two adapters are provided:
//!
//! - [`memory::MemoryStore`]: process-local, used for development and tests
//! - [`postgres::PgDocumentStore`]: a single JSONB table in PostgreSQL
//!
//! The store is built once at start-up and handed around as
//! `Arc<dyn DocumentStore>`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Top-level fields of a document
pub type Fields = Map<String, Value>;

/// A stored document: its identifier plus its field set
///
/// The identifier is kept outside `data` so a client payload can never
/// overwrite it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Decodes the document into `T`, stamping the store id as `id`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut data = self.data.clone();
        data.insert("id".to_string(), Value::String(self.id.clone()));

        serde_json::from_value(Value::Object(data)).map_err(|e| StoreError::Decode {
            id: self.id.clone(),
            message: e.to_string(),
        })
    }
}

/// Store adapter errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {collection}/{id} does not exist")]
    NotFound { collection: String, id: String },

    #[error("document {id} could not be decoded: {message}")]
    Decode { id: String, message: String },

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Collection-oriented document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Verifies the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;

    /// All documents of a collection, oldest first
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// One document, or `None` when the id does not resolve
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Inserts a document and returns its generated identifier
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Shallow-merges `patch` into an existing document
    ///
    /// Returns [`StoreError::NotFound`] when the document is absent.
    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<(), StoreError>;

    /// Removes a document
    ///
    /// Returns [`StoreError::NotFound`] when the document is absent.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Documents whose top-level `field` equals `value`
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Named {
        id: String,
        nombre: String,
    }

    #[test]
    fn test_decode_stamps_id() {
        let data = json!({"nombre": "Trabajo"}).as_object().cloned().unwrap();
        let doc = Document::new("abc", data);

        let named: Named = doc.decode().unwrap();
        assert_eq!(named.id, "abc");
        assert_eq!(named.nombre, "Trabajo");
    }

    #[test]
    fn test_decode_id_wins_over_stored_field() {
        let data = json!({"id": "forged", "nombre": "x"}).as_object().cloned().unwrap();
        let doc = Document::new("real", data);

        let named: Named = doc.decode().unwrap();
        assert_eq!(named.id, "real");
    }

    #[test]
    fn test_decode_failure_reports_id() {
        let data = json!({"nombre": 5}).as_object().cloned().unwrap();
        let doc = Document::new("bad", data);

        match doc.decode::<Named>() {
            Err(StoreError::Decode { id, .. }) => assert_eq!(id, "bad"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }
}
