pub mod common;
pub mod products;

use std::sync::Arc;

use crate::repositories::ProductStore;
use crate::services::ProductService;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: ProductService,
}

impl AppServices {
    /// Builds every service on top of one product store.
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            products: ProductService::new(store),
        }
    }
}
