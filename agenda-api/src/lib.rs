//! # Agenda API Server Library
//!
//! REST endpoints for tasks, subtasks, habits, reminders, categories and
//! users, with bearer-token authentication.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration from environment variables
//! - `error`: error handling and HTTP response mapping
//! - `extract`: JSON body extractor with JSON error responses
//! - `middleware`: request logging
//! - `routes`: route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
