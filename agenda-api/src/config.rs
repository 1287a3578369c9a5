//! Configuration management
//!
//! Configuration is read once from environment variables (after loading an
//! optional `.env` file) and shared read-only for the life of the process.
//!
//! # Environment Variables
//!
//! - `API_HOST` (default `0.0.0.0`), `API_PORT` (default `3001`)
//! - `API_BASE_PATH`: prefix for resource routes (default `/api`)
//! - `CORS_ORIGINS`: comma-separated origins, `*` for any (default `*`)
//! - `APP_ENV`: `production` turns off per-request logging
//! - `JWT_SECRET`: required, at least 32 characters
//! - `DATABASE_URL`: PostgreSQL URL; when unset the in-memory store is used
//! - `DATABASE_MAX_CONNECTIONS` (default `10`)
//! - `ACCESS_POLICY`: `admin` (default) or `owner`
//! - `LOG_FORMAT`: `text` (default) or `json`

use std::env;

use anyhow::{bail, Context};

pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,

    /// `None` selects the in-memory store
    pub database: Option<DatabaseConfig>,

    pub jwt: JwtConfig,

    /// Name of the ownership policy, validated at load time
    pub access_policy: String,

    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub base_path: String,
    pub cors_origins: Vec<String>,
    pub production: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").field("secret", &"<redacted>").finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes
    /// `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = get("API_PORT", "3001")
            .parse::<u16>()
            .context("API_PORT must be a port number")?;

        let base_path = normalize_base_path(&get("API_BASE_PATH", "/api"));

        let cors_origins = get("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let production = get("APP_ENV", "development").eq_ignore_ascii_case("production");

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: get("DATABASE_MAX_CONNECTIONS", "10")
                    .parse::<u32>()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            }),
            None => None,
        };

        let secret = lookup("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if secret.len() < MIN_SECRET_LEN {
            bail!("JWT_SECRET must be at least {} characters long", MIN_SECRET_LEN);
        }

        let access_policy = get("ACCESS_POLICY", "admin").trim().to_ascii_lowercase();
        if agenda_shared::auth::authorization::policy_from_name(&access_policy).is_none() {
            bail!("ACCESS_POLICY must be 'admin' or 'owner', got '{}'", access_policy);
        }

        let log_format = match get("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" => LogFormat::Text,
            other => bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", other),
        };

        Ok(Self {
            api: ApiConfig {
                host: get("API_HOST", "0.0.0.0"),
                port,
                base_path,
                cors_origins,
                production,
            },
            database,
            jwt: JwtConfig { secret },
            access_policy,
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// `api/` and `/api/` both become `/api`; an empty path means the root.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
