//! Entity models
//!
//! Every entity is a document in its own collection. Each module defines:
//!
//! - the entity as read back from the store (`Category`, `Task`, ...)
//! - a `Create*Request` parsed from the client body, with its presence checks
//! - a `New*` value that is written on insert, server defaults applied
//! - a `*Patch` allow-list of client-mutable fields for updates
//!
//! Field names on the wire and in storage are the Spanish names clients use
//! (`nombre`, `titulo`, `fecha_creacion`, ...).

pub mod category;
pub mod fields;
pub mod habit;
pub mod reminder;
pub mod subtask;
pub mod task;
pub mod user;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub use category::Category;
pub use habit::Habit;
pub use reminder::Reminder;
pub use subtask::Subtask;
pub use task::Task;
pub use user::User;

/// A document type stored in its own collection
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection (and URL segment) name
    const COLLECTION: &'static str;

    /// Field matched by substring search; also the query parameter name
    const SEARCH_FIELD: &'static str;

    /// Field holding the owning user's id, for resources that have one
    const OWNER_FIELD: Option<&'static str> = None;

    /// Allow-listed partial update
    type Patch: Serialize + Send + Sync;

    /// Value of [`Self::SEARCH_FIELD`], if set
    fn search_text(&self) -> Option<&str>;

    fn owner_id(&self) -> Option<&str> {
        None
    }
}

/// A required field was absent or empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

/// Presence check: absent and empty strings both fail.
pub(crate) fn required(
    value: Option<String>,
    message: &'static str,
) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError(message))
}
