use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = r#"
# Inventory API

Create, list, restock and remove products.

## Error Handling

Every failure carries a single message:

```json
{ "error": "Product not found" }
```

Field constraint violations and missing keys answer `400`, unknown ids `404`,
store failures `500`.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "products", description = "Product records"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::products::create_product,
        crate::handlers::products::list_products,
        crate::handlers::products::update_product_quantity,
        crate::handlers::products::delete_product,
        crate::health::health_check,
    ),
    components(
        schemas(
            crate::entities::product::Model,
            crate::dto::product::CreateProductRequest,
            crate::dto::product::UpdateQuantityRequest,
            crate::errors::ErrorResponse,
            crate::health::HealthInfo,
            crate::health::HealthChecks,
            crate::health::HealthStatus,
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
