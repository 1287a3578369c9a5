//! Middleware for the API server
//!
//! - `logging`: one log line per completed request (disabled in production)

pub mod logging;
