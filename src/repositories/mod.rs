use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::product::{Model as ProductModel, NewProduct};
use crate::errors::ServiceError;

pub mod in_memory;
pub mod product_repository;

pub use in_memory::InMemoryProductStore;
pub use product_repository::ProductRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Persistence contract the product service depends on.
///
/// Implementations own all stored state; callers never cache records
/// between calls.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Stores a new product and returns it with its assigned id.
    async fn insert(&self, product: NewProduct) -> Result<ProductModel, ServiceError>;

    /// Overwrites the stored product with the same id.
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown.
    async fn update(&self, product: ProductModel) -> Result<ProductModel, ServiceError>;

    async fn find_all(&self) -> Result<Vec<ProductModel>, ServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, ServiceError>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError>;

    /// Removes the product if present; unknown ids are ignored.
    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError>;

    /// Removes every product, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, ServiceError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}
