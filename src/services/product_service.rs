use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    dto::product::{QUANTITY_NEGATIVE, QUANTITY_REQUIRED},
    entities::product::{Model as ProductModel, NewProduct},
    errors::ServiceError,
    repositories::ProductStore,
};

/// Service for managing products
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    /// Creates a new product service instance
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Checks that the backing store is reachable
    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.store.ping().await
    }

    /// Persists a validated product and returns it with its new id
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add(&self, product: NewProduct) -> Result<ProductModel, ServiceError> {
        let created = self.store.insert(product).await?;
        info!(product_id = created.id, quantity = created.quantity, "Product created");
        Ok(created)
    }

    /// Lists every stored product
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<ProductModel>, ServiceError> {
        self.store.find_all().await
    }

    /// Replaces the quantity of an existing product; nothing else changes.
    ///
    /// The existence check runs before the quantity is inspected, so an
    /// unknown id always reports not found.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        id: i32,
        quantity: Option<i32>,
    ) -> Result<ProductModel, ServiceError> {
        let mut product = self.store.find_by_id(id).await?.ok_or_else(|| {
            warn!(product_id = id, "Quantity update for unknown product");
            ServiceError::product_not_found()
        })?;

        let quantity =
            quantity.ok_or_else(|| ServiceError::ValidationError(QUANTITY_REQUIRED.to_string()))?;
        if quantity < 0 {
            return Err(ServiceError::ValidationError(QUANTITY_NEGATIVE.to_string()));
        }

        let previous = product.quantity;
        product.quantity = quantity;
        let updated = self.store.update(product).await?;

        info!(product_id = id, previous, quantity, "Product quantity updated");
        Ok(updated)
    }

    /// Deletes a product by id
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.store.exists_by_id(id).await? {
            warn!(product_id = id, "Delete requested for unknown product");
            return Err(ServiceError::product_not_found());
        }

        self.store.delete_by_id(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }
}
