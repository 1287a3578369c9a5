//! PostgreSQL plumbing for the document store
//!
//! - `pool`: connection pool construction and health checks
//! - `migrations`: embedded schema migrations for the `documents` table

pub mod migrations;
pub mod pool;
