//! Generic resource access over a [`DocumentStore`]
//!
//! `Repository<R>` gives every [`Resource`] the same six operations:
//! list, get, create, update, delete and equality lookup, plus the in-process
//! substring search built on top of list.
//!
//! Absence is `Ok(None)`, never an error, so callers can tell "not found"
//! apart from a store failure. Mapping failures to empty lists or 404s is the
//! HTTP layer's decision.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use agenda_shared::models::category::{Category, CreateCategoryRequest};
//! use agenda_shared::repository::Repository;
//! use agenda_shared::store::MemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo: Repository<Category> = Repository::new(Arc::new(MemoryStore::new()));
//! let new = CreateCategoryRequest { nombre: Some("Ocio".into()), ..Default::default() }.validate()?;
//! let created = repo.create(&new).await?;
//! assert!(repo.get_by_id(&created.id).await?.is_some());
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{fields::to_fields, Resource, User};
use crate::store::{Document, DocumentStore, StoreError};

#[derive(Debug, Error)]
pub enum AccessError {
    /// Payload was not a JSON object
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub deleted: bool,
    pub id: String,
}

pub struct Repository<R> {
    store: Arc<dyn DocumentStore>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _resource: PhantomData,
        }
    }
}

/// Case-insensitive substring match; a missing value or query counts as "".
pub fn matches_query(value: Option<&str>, query: Option<&str>) -> bool {
    let query = query.unwrap_or_default().to_lowercase();
    value.unwrap_or_default().to_lowercase().contains(&query)
}

impl<R: Resource> Repository<R> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    fn decode_all(docs: Vec<Document>) -> Vec<R> {
        docs.into_iter()
            .filter_map(|doc| match doc.decode::<R>() {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(collection = R::COLLECTION, error = %e, "Skipping undecodable document");
                    None
                }
            })
            .collect()
    }

    /// Every document in the collection
    pub async fn list_all(&self) -> Result<Vec<R>, AccessError> {
        let docs = self.store.list(R::COLLECTION).await?;
        Ok(Self::decode_all(docs))
    }

    /// Documents owned by `owner`, or everything when `owner` is `None`.
    ///
    /// Resources without an owner field ignore the scope.
    pub async fn list_scoped(&self, owner: Option<&str>) -> Result<Vec<R>, AccessError> {
        match (owner, R::OWNER_FIELD) {
            (Some(owner), Some(field)) => self.query_by_field(field, owner).await,
            _ => self.list_all().await,
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<R>, AccessError> {
        match self.store.get(R::COLLECTION, id).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Inserts `new` and returns it with its generated id.
    pub async fn create<N: Serialize>(&self, new: &N) -> Result<R, AccessError> {
        let fields = to_fields(new).ok_or_else(|| {
            AccessError::InvalidInput(format!("{} payload must be an object", R::COLLECTION))
        })?;

        let id = self.store.add(R::COLLECTION, fields.clone()).await?;
        debug!(collection = R::COLLECTION, id = %id, "Created document");

        Ok(Document::new(id, fields).decode()?)
    }

    /// Merges `patch` into an existing document and returns the stored result.
    ///
    /// `Ok(None)` when the id does not resolve; nothing is written in that case.
    pub async fn update(&self, id: &str, patch: &R::Patch) -> Result<Option<R>, AccessError> {
        if self.store.get(R::COLLECTION, id).await?.is_none() {
            return Ok(None);
        }

        let fields = to_fields(patch).ok_or_else(|| {
            AccessError::InvalidInput(format!("{} patch must be an object", R::COLLECTION))
        })?;

        if !fields.is_empty() {
            match self.store.update(R::COLLECTION, id, fields).await {
                Ok(()) => {}
                Err(StoreError::NotFound { .. }) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }

        self.get_by_id(id).await
    }

    /// `Ok(None)` when the id does not resolve.
    pub async fn delete_by_id(&self, id: &str) -> Result<Option<Deleted>, AccessError> {
        if self.store.get(R::COLLECTION, id).await?.is_none() {
            return Ok(None);
        }

        match self.store.delete(R::COLLECTION, id).await {
            Ok(()) => Ok(Some(Deleted {
                deleted: true,
                id: id.to_string(),
            })),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Equality lookup on a top-level field
    pub async fn query_by_field(
        &self,
        field: &str,
        value: impl Into<Value> + Send,
    ) -> Result<Vec<R>, AccessError> {
        let value = value.into();
        let docs = self.store.find_by_field(R::COLLECTION, field, &value).await?;
        Ok(Self::decode_all(docs))
    }

    /// Substring search on [`Resource::SEARCH_FIELD`] within the owner scope
    pub async fn search(
        &self,
        query: Option<&str>,
        owner: Option<&str>,
    ) -> Result<Vec<R>, AccessError> {
        let items = self.list_scoped(owner).await?;
        Ok(items
            .into_iter()
            .filter(|item| matches_query(item.search_text(), query))
            .collect())
    }
}

impl Repository<User> {
    /// First user with exactly this email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccessError> {
        Ok(self.query_by_field("email", email).await?.into_iter().next())
    }
}
