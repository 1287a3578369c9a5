//! Request extractors
//!
//! [`ApiJson`] behaves like `axum::Json` but rejects with [`ApiError`], so a
//! malformed or wrongly-typed body yields `400 {"error": ...}`.

use axum::extract::FromRequest;

use crate::error::ApiError;

#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
