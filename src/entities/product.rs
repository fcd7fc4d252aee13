use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "products")]
#[schema(as = Product)]
pub struct Model {
    /// Store-assigned identifier
    #[sea_orm(primary_key)]
    #[schema(example = 1)]
    pub id: i32,

    /// Product name, 1 to 50 characters
    #[schema(example = "Notebook")]
    pub name: String,

    /// Optional description, at most 200 characters
    #[schema(example = "A5 ruled")]
    pub description: Option<String>,

    /// Units on hand, never negative
    #[schema(example = 100)]
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A validated product that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
}

impl NewProduct {
    /// Attaches a store-assigned id.
    pub fn with_id(self, id: i32) -> Model {
        Model {
            id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
        }
    }
}
