use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set};
use std::sync::Arc;
use tracing::{debug, error};

use crate::entities::product::{
    ActiveModel as ProductActiveModel, Entity as Product, Model as ProductModel, NewProduct,
};
use crate::errors::ServiceError;
use crate::repositories::{ProductStore, Repository};

use super::BaseRepository;

/// SeaORM-backed product store
#[derive(Debug, Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn db_failure(operation: &'static str, err: DbErr) -> ServiceError {
    error!(operation, error = %err, "Product store operation failed");
    ServiceError::DatabaseError(err)
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<ProductModel, ServiceError> {
        let active = ProductActiveModel {
            name: Set(product.name),
            description: Set(product.description),
            quantity: Set(product.quantity),
            ..Default::default()
        };

        let stored = active
            .insert(self.base.get_db())
            .await
            .map_err(|e| db_failure("insert", e))?;
        debug!(product_id = stored.id, "Inserted product row");
        Ok(stored)
    }

    async fn update(&self, product: ProductModel) -> Result<ProductModel, ServiceError> {
        // mark every column dirty so the whole row is written
        let active = ProductActiveModel::from(product).reset_all();

        match active.update(self.base.get_db()).await {
            Ok(stored) => Ok(stored),
            // the row vanished between lookup and write
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::product_not_found()),
            Err(e) => Err(db_failure("update", e)),
        }
    }

    async fn find_all(&self) -> Result<Vec<ProductModel>, ServiceError> {
        Product::find()
            .all(self.base.get_db())
            .await
            .map_err(|e| db_failure("find_all", e))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, ServiceError> {
        Product::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(|e| db_failure("find_by_id", e))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let count = Product::find_by_id(id)
            .count(self.base.get_db())
            .await
            .map_err(|e| db_failure("exists_by_id", e))?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let result = Product::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map_err(|e| db_failure("delete_by_id", e))?;
        debug!(product_id = id, rows = result.rows_affected, "Deleted product row");
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let result = Product::delete_many()
            .exec(self.base.get_db())
            .await
            .map_err(|e| db_failure("delete_all", e))?;
        Ok(result.rows_affected)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        self.base
            .get_db()
            .ping()
            .await
            .map_err(|e| db_failure("ping", e))
    }
}
