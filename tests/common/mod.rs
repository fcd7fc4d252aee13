#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use inventory_api::{
    config::AppConfig,
    db,
    entities::product::{Model as Product, NewProduct},
    repositories::{ProductRepository, ProductStore},
    AppState,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness for spinning up the application against a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub store: Arc<ProductRepository>,
    _db_dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = db_dir.path().join("inventory_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let store = Arc::new(ProductRepository::new(Arc::new(pool)));
        let state = AppState::new(cfg, store.clone());
        let router = inventory_api::app_router(state.clone()).expect("failed to build router");

        Self {
            router,
            state,
            store,
            _db_dir: db_dir,
        }
    }

    /// Sends a request with an optional JSON body through the router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let body = body.map(|json| serde_json::to_vec(&json).expect("failed to serialize json request body"));
        self.request_raw(method, uri, body).await
    }

    /// Sends raw bytes as a JSON request body, for exercising malformed payloads.
    pub async fn request_raw(&self, method: Method, uri: &str, body: Option<Vec<u8>>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(bytes) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(bytes)
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Inserts a product directly through the store.
    pub async fn seed_product(&self, name: &str, description: Option<&str>, quantity: i32) -> Product {
        self.store
            .insert(NewProduct {
                name: name.to_string(),
                description: description.map(str::to_string),
                quantity,
            })
            .await
            .expect("failed to seed product")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

pub async fn response_text(response: Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf8 response")
}
