//! Inventory API Library
//!
//! Product inventory records over HTTP: handlers, services, and the
//! store abstraction they share.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::Router;
use http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};

use crate::errors::ServiceError;
use crate::handlers::products::ProductHandlerState;
use crate::repositories::ProductStore;
use crate::services::ProductService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(config: config::AppConfig, store: Arc<dyn ProductStore>) -> Self {
        Self {
            config,
            services: handlers::AppServices::new(store),
        }
    }
}

impl ProductHandlerState for AppState {
    fn product_service(&self) -> &ProductService {
        &self.services.products
    }
}

/// Builds the CORS layer from configuration.
///
/// Explicit origins win; otherwise permissive CORS is used only where the
/// configuration allows it.
pub fn build_cors_layer(cfg: &config::AppConfig) -> Result<CorsLayer, ServiceError> {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        let layer = CorsLayer::new().allow_origin(origins);
        // wildcards are rejected by tower-http once credentials are allowed
        return Ok(if cfg.cors_allow_credentials {
            layer
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        } else {
            layer.allow_methods(Any).allow_headers(Any)
        });
    }

    if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        return Ok(CorsLayer::permissive());
    }

    ::tracing::error!("Missing CORS configuration detected; set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true");
    Err(ServiceError::InternalError(
        "Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true"
            .to_string(),
    ))
}

/// Assembles the full HTTP application: product routes, health, API docs,
/// and the tracing, CORS and request id layers.
pub fn app_router(state: AppState) -> Result<Router, ServiceError> {
    let cors_layer = build_cors_layer(&state.config)?;

    let app = Router::<AppState>::new()
        .nest("/products", handlers::products::products_router::<AppState>())
        .merge(health::health_routes::<AppState>())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors_layer)
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state);

    Ok(app)
}
