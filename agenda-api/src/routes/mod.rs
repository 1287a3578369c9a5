//! API route handlers
//!
//! - `crud`: generic list/search/get/update/delete shared by all resources
//! - one module per resource for its create handler and any extra routes
//! - `auth`: login
//! - `health`: service banner and health check

pub mod auth;
pub mod categories;
pub mod crud;
pub mod habits;
pub mod health;
pub mod reminders;
pub mod subtasks;
pub mod tasks;
pub mod users;

use crate::error::{ApiError, ROUTE_NOT_FOUND};

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound(ROUTE_NOT_FOUND.to_string())
}
