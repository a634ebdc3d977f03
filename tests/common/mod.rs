//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that drives the real router against a fresh
//! in-memory database, one per test. Methods are intentionally broad to
//! support various scenarios across different test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use fintrack::config::Config;
use fintrack::db::{create_in_memory_pool, migrations};
use fintrack::handlers;
use fintrack::state::AppState;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn, Path::new("migrations"))
                .expect("Failed to run migrations");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            database_path: PathBuf::from(":memory:"),
            migrations_path: PathBuf::from("migrations"),
        };

        let state = AppState {
            db: pool,
            config: Arc::new(config),
        };

        Self { state }
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Make a GET request and parse the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, uri: &str) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_str(&body).ok())
    }

    async fn send_json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, String) {
        self.send_json(Method::POST, uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, String) {
        self.send_json(Method::PUT, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Create a transaction; returns true on 201.
    pub async fn create_transaction(
        &self,
        date: &str,
        amount: f64,
        description: &str,
        category: &str,
        kind: &str,
    ) -> bool {
        let (status, _) = self
            .post_json(
                "/transactions",
                json!({
                    "description": description,
                    "amount": amount,
                    "category": category,
                    "type": kind,
                    "date": date,
                }),
            )
            .await;
        status == StatusCode::CREATED
    }

    /// Create a budget; returns true on 201.
    pub async fn create_budget(&self, category: &str, amount: f64, month: u32, year: i32) -> bool {
        let (status, _) = self
            .post_json(
                "/budgets",
                json!({
                    "category": category,
                    "amount": amount,
                    "month": month,
                    "year": year,
                }),
            )
            .await;
        status == StatusCode::CREATED
    }
}
