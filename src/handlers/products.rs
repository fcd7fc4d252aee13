use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
    Router,
};

use crate::dto::product::{CreateProductRequest, UpdateQuantityRequest};
use crate::errors::ServiceError;
use crate::handlers::common::{created_response, success_response, ApiJson, ApiPath};
use crate::services::ProductService;

/// Confirmation body returned by `DELETE /products/{id}`
pub const DELETE_CONFIRMATION: &str = "Product deleted successfully";

// Trait for product handler state that provides access to the product service
pub trait ProductHandlerState: Clone + Send + Sync + 'static {
    fn product_service(&self) -> &ProductService;
}

/// Narrows a path id to the stored id type; ids the column cannot hold
/// belong to no product.
fn stored_id(id: i64) -> Result<i32, ServiceError> {
    i32::try_from(id).map_err(|_| ServiceError::product_not_found())
}

/// Create the products router
pub fn products_router<S>() -> Router<S>
where
    S: ProductHandlerState,
{
    Router::new()
        .route("/", get(list_products::<S>).post(create_product::<S>))
        .route("/:id", delete(delete_product::<S>))
        .route("/:id/quantity", put(update_product_quantity::<S>))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = crate::entities::product::Model),
        (status = 400, description = "Validation failed", body = crate::errors::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product<S>(
    State(state): State<S>,
    ApiJson(payload): ApiJson<CreateProductRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: ProductHandlerState,
{
    let product = payload.into_new_product()?;
    let created = state.product_service().add(product).await?;
    Ok(created_response(created))
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All stored products", body = [crate::entities::product::Model]),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn list_products<S>(State(state): State<S>) -> Result<impl IntoResponse, ServiceError>
where
    S: ProductHandlerState,
{
    let products = state.product_service().get_all().await?;
    Ok(success_response(products))
}

/// Replace the quantity of a product
#[utoipa::path(
    put,
    path = "/products/{id}/quantity",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated", body = crate::entities::product::Model),
        (status = 400, description = "Quantity missing or negative", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product_quantity<S>(
    State(state): State<S>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateQuantityRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: ProductHandlerState,
{
    let quantity = payload.require_quantity()?;
    let id = stored_id(id)?;
    let updated = state
        .product_service()
        .update_quantity(id, quantity)
        .await?;
    Ok(success_response(updated))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn delete_product<S>(
    State(state): State<S>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: ProductHandlerState,
{
    state.product_service().delete(stored_id(id)?).await?;
    Ok((StatusCode::OK, DELETE_CONFIRMATION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn path_ids_outside_column_range_are_not_found() {
        assert_eq!(stored_id(42).unwrap(), 42);
        assert_eq!(stored_id(i32::MAX as i64).unwrap(), i32::MAX);
        assert_matches!(stored_id(3_000_000_000), Err(ServiceError::NotFound(msg)) if msg == "Product not found");
        assert_matches!(stored_id(i64::MIN), Err(ServiceError::NotFound(_)));
    }
}
