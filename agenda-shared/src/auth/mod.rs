//! Authentication and authorization
//!
//! - [`password`]: Argon2id hashing and verification
//! - [`jwt`]: one-hour HS256 bearer tokens carrying `{id, email}`
//! - [`middleware`]: bearer verification for axum routes
//! - [`authorization`]: pluggable ownership policy
//! - [`service`]: registration and login

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;

pub use authorization::{AccessPolicy, AdminMode, AuthzError, OwnerOnly};
pub use middleware::{AuthError, AuthUser};
pub use service::{AuthService, AuthServiceError};
