//! Service banner and health check
//!
//! ```text
//! GET /        -> {"mensaje": "API de Agenda funcionando"}
//! GET /health  -> {"status": "healthy", "version": "0.1.0", "database": "connected"}
//! ```

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::app::AppState;

pub const BANNER: &str = "API de Agenda funcionando";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

pub async fn index() -> Json<Value> {
    Json(json!({ "mensaje": BANNER }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Document store health check failed");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: if database == "connected" { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
