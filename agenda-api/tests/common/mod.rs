//! Shared fixtures for the API integration tests
//!
//! Every context runs the full router over a fresh in-memory store, so the
//! tests need no external services.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use agenda_api::app::{build_router, AppState};
use agenda_api::config::Config;
use agenda_shared::auth::jwt::{create_token, Claims};
use agenda_shared::store::{Document, DocumentStore, Fields, MemoryStore, StoreError};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tower::Service as _;

pub const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
}

impl TestContext {
    /// Admin policy, `/api` base path
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Owner policy: owned resources require a token and are scoped
    pub fn owner_policy() -> Self {
        Self::with_env(&[("ACCESS_POLICY", "owner")])
    }

    /// Every store call fails, as with an unreachable database
    pub fn failing_store() -> Self {
        Self::with_store(Arc::new(FailingStore), &[])
    }

    pub fn with_env(extra: &[(&str, &str)]) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), extra)
    }

    pub fn with_store(store: Arc<dyn DocumentStore>, extra: &[(&str, &str)]) -> Self {
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert("JWT_SECRET".into(), SECRET.into());
        vars.insert("APP_ENV".into(), "test".into());
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }

        let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config");
        let state = AppState::new(Arc::clone(&store), config.clone()).expect("valid state");

        Self {
            app: build_router(state),
            store,
            config,
        }
    }

    /// Signs a token for an arbitrary user id
    pub fn token_for(&self, id: &str, email: &str) -> String {
        create_token(&Claims::new(id, email), SECRET).expect("token")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).expect("request")).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.expect("infallible");
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None, None).await
    }

    /// Registers a user and logs in, returning `(user id, token)`
    pub async fn register_and_login(&self, email: &str) -> (String, String) {
        let (status, user) = self
            .post(
                "/api/users",
                serde_json::json!({"nombre": "Ana", "email": email, "password": "secreto123"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register: {}", user);

        let (status, login) = self
            .post(
                "/api/auth/login",
                serde_json::json!({"email": email, "password": "secreto123"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login: {}", login);

        (
            user["id"].as_str().expect("id").to_string(),
            login["token"].as_str().expect("token").to_string(),
        )
    }
}

/// Store double whose every operation reports a backend failure
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Backend("connection refused".into())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }

    async fn list(&self, _: &str) -> Result<Vec<Document>, StoreError> {
        Err(down())
    }

    async fn get(&self, _: &str, _: &str) -> Result<Option<Document>, StoreError> {
        Err(down())
    }

    async fn add(&self, _: &str, _: Fields) -> Result<String, StoreError> {
        Err(down())
    }

    async fn update(&self, _: &str, _: &str, _: Fields) -> Result<(), StoreError> {
        Err(down())
    }

    async fn delete(&self, _: &str, _: &str) -> Result<(), StoreError> {
        Err(down())
    }

    async fn find_by_field(
        &self,
        _: &str,
        _: &str,
        _: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        Err(down())
    }
}
