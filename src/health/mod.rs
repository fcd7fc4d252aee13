/*!
 * # Health Check Module
 *
 * `GET /health` reports whether the service can reach its product store.
 */

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::handlers::products::ProductHandlerState;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthChecks {
    pub database: HealthStatus,
}

/// Overall health information
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

pub fn health_routes<S>() -> Router<S>
where
    S: ProductHandlerState,
{
    Router::new().route("/health", get(health_check::<S>))
}

/// Basic health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and store are reachable", body = HealthInfo),
        (status = 503, description = "Store unreachable", body = HealthInfo)
    ),
    tag = "health"
)]
pub async fn health_check<S>(State(state): State<S>) -> impl IntoResponse
where
    S: ProductHandlerState,
{
    let database = match state.product_service().ping().await {
        Ok(()) => HealthStatus::Up,
        Err(e) => {
            error!("Database health check failed: {}", e);
            HealthStatus::Down
        }
    };

    let status_code = match database {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(HealthInfo {
            status: database,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks { database },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::entities::product::{Model as ProductModel, NewProduct};
    use crate::errors::ServiceError;
    use crate::repositories::{InMemoryProductStore, ProductStore};
    use crate::AppState;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use sea_orm::DbErr;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Store whose every call fails as if the database were gone.
    struct UnreachableStore;

    fn unreachable() -> ServiceError {
        ServiceError::DatabaseError(DbErr::Custom("connection refused".into()))
    }

    #[async_trait]
    impl ProductStore for UnreachableStore {
        async fn insert(&self, _product: NewProduct) -> Result<ProductModel, ServiceError> {
            Err(unreachable())
        }
        async fn update(&self, _product: ProductModel) -> Result<ProductModel, ServiceError> {
            Err(unreachable())
        }
        async fn find_all(&self) -> Result<Vec<ProductModel>, ServiceError> {
            Err(unreachable())
        }
        async fn find_by_id(&self, _id: i32) -> Result<Option<ProductModel>, ServiceError> {
            Err(unreachable())
        }
        async fn exists_by_id(&self, _id: i32) -> Result<bool, ServiceError> {
            Err(unreachable())
        }
        async fn delete_by_id(&self, _id: i32) -> Result<(), ServiceError> {
            Err(unreachable())
        }
        async fn delete_all(&self) -> Result<u64, ServiceError> {
            Err(unreachable())
        }
        async fn ping(&self) -> Result<(), ServiceError> {
            Err(unreachable())
        }
    }

    async fn get_health(store: Arc<dyn ProductStore>) -> (StatusCode, Value) {
        let cfg = AppConfig::new("sqlite::memory:".into(), "127.0.0.1".into(), 8080, "test".into());
        let app = health_routes::<AppState>().with_state(AppState::new(cfg, store));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn reachable_store_reports_up() {
        let (status, body) = get_health(Arc::new(InMemoryProductStore::new())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "up");
        assert_eq!(body["checks"]["database"], "up");
    }

    #[tokio::test]
    async fn unreachable_store_reports_down_with_503() {
        let (status, body) = get_health(Arc::new(UnreachableStore)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "down");
        assert_eq!(body["checks"]["database"], "down");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
