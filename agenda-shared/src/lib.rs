//! # Agenda Shared Library
//!
//! Domain types and services behind the Agenda REST API.
//!
//! ## Module Organization
//!
//! - `store`: document store trait with in-memory and PostgreSQL adapters
//! - `db`: PostgreSQL pool and migrations
//! - `models`: entities, create requests and update patches
//! - `repository`: generic CRUD and search over any entity
//! - `auth`: passwords, tokens, bearer middleware, access policy, login

pub mod auth;
pub mod db;
pub mod models;
pub mod repository;
pub mod store;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
