use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::entities::product::{Model as ProductModel, NewProduct};
use crate::errors::ServiceError;
use crate::repositories::ProductStore;

/// Process-local product store keyed by id.
///
/// Ids start at 1 and are never reused, even after `delete_all`.
#[derive(Debug)]
pub struct InMemoryProductStore {
    products: DashMap<i32, ProductModel>,
    next_id: AtomicI32,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<ProductModel, ServiceError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = product.with_id(id);
        self.products.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, product: ProductModel) -> Result<ProductModel, ServiceError> {
        match self.products.get_mut(&product.id) {
            Some(mut entry) => {
                *entry = product.clone();
                Ok(product)
            }
            None => Err(ServiceError::product_not_found()),
        }
    }

    async fn find_all(&self) -> Result<Vec<ProductModel>, ServiceError> {
        let mut all: Vec<ProductModel> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, ServiceError> {
        Ok(self.products.get(&id).map(|entry| entry.value().clone()))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.products.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        self.products.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let removed = self.products.len() as u64;
        self.products.clear();
        Ok(removed)
    }
}
