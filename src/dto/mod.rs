pub mod product;

pub use product::{CreateProductRequest, UpdateQuantityRequest, Violation};
